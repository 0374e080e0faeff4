use anyhow::Result;
use keypack_codec::{pack_formatted, packed_size, unpack_formatted, PackErr, Value};

#[test]
fn ints_round_trip() -> Result<()> {
    let vals = [Value::I32(1), Value::I32(-2), Value::I32(300)];
    let buf = pack_formatted("3i", &vals)?;

    let mut dsts = [Value::I32(0), Value::I32(0), Value::I32(0)];
    unpack_formatted("3i", &buf, &mut dsts)?;
    assert_eq!(dsts, vals);
    Ok(())
}

#[test]
fn text_shapes() -> Result<()> {
    assert_eq!(pack_formatted("5s", &[Value::from("ab")])?, b"ab\0\0\0");
    assert_eq!(pack_formatted("5s", &[Value::from("abcdef")])?, b"abcde");
    assert_eq!(pack_formatted("S", &[Value::from("hello")])?, b"hello\0");
    assert_eq!(pack_formatted("S", &[Value::from("")])?, b"\0");
    Ok(())
}

#[test]
fn padding_only() -> Result<()> {
    assert_eq!(pack_formatted("3x", &[])?, vec![0u8, 0, 0]);
    assert_eq!(packed_size("3x", &[])?, 3);
    Ok(())
}

#[test]
fn truncated_varint_is_invalid_param() -> Result<()> {
    let buf = pack_formatted("Q", &[Value::U64(u64::MAX)])?;
    for cut in 1..buf.len() {
        let mut dsts = [Value::U64(0)];
        let res = unpack_formatted("Q", &buf[..cut], &mut dsts);
        assert!(matches!(res, Err(PackErr::InvalidParam(_))), "cut at {}", cut);
    }
    Ok(())
}

#[test]
fn kind_mismatch_is_an_error_not_a_panic() {
    let res = pack_formatted("u", &[Value::I32(1)]);
    assert!(matches!(res, Err(PackErr::InvalidParam(_))));

    let res = pack_formatted("Q", &[Value::from("1")]);
    assert!(matches!(res, Err(PackErr::InvalidParam(_))));

    let mut dsts = [Value::Str(String::new())];
    let res = unpack_formatted("u", &[1, 2], &mut dsts);
    assert!(matches!(res, Err(PackErr::InvalidParam(_))));
}

#[test]
fn format_errors() {
    for fmt in ["@i", "<i", ">i", ".", "3", "i12", "0s", "9t", "k"] {
        let res = pack_formatted(fmt, &[Value::I32(1)]);
        assert!(res.is_err(), "{:?}", fmt);
    }
}

/// A record laid out the way a storage engine might key a row.
#[test]
fn row_record_round_trip() -> Result<()> {
    let fmt = ".Sb3t2xHqU";
    let vals = [
        Value::from("users"),
        Value::I8(-3),
        Value::U8(0b101),
        Value::U16(8256),
        Value::I64(-8257),
        Value::from(vec![0xdeu8, 0xad, 0xbe, 0xef]),
    ];
    let buf = pack_formatted(fmt, &vals)?;
    assert_eq!(buf.len(), packed_size(fmt, &vals)?);

    let mut dsts = [
        Value::Str(String::new()),
        Value::I8(0),
        Value::U8(0),
        Value::U16(0),
        Value::I64(0),
        Value::Bytes(vec![]),
    ];
    unpack_formatted(fmt, &buf, &mut dsts)?;
    assert_eq!(dsts, vals);
    Ok(())
}
