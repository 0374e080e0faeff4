use anyhow::Result;
use keypack_codec::{pack_values, unpack_values, values_size, PackErr, Seq, Value};

#[test]
fn trailing_value_is_unbounded() -> Result<()> {
    let vals = [
        Value::from("foo"),
        Value::from(vec![1u8, 2, 3]),
        Value::U64(42),
    ];
    let buf = pack_values(&vals);
    assert_eq!(buf, [b'f', b'o', b'o', 0, 0x83, 1, 2, 3, 0xaa]);
    assert_eq!(buf.len(), values_size(&vals));

    let mut dsts = [Value::Str(String::new()), Value::Bytes(vec![]), Value::U64(0)];
    unpack_values(&buf, &mut dsts)?;
    assert_eq!(dsts, vals);
    Ok(())
}

/// A directory entry: name, permissions, then child ids to the end.
#[test]
fn entry_with_trailing_ids() -> Result<()> {
    let vals = [
        Value::from("etc"),
        Value::U16(0o755),
        Value::Seq(Seq::Str(vec![String::from("passwd"), String::from("hosts")])),
        Value::Seq(Seq::from(vec![3u64, 1 << 33, 0])),
    ];
    let buf = pack_values(&vals);

    let mut dsts = [
        Value::Str(String::new()),
        Value::U16(0),
        Value::Seq(Seq::Str(vec![])),
        Value::Seq(Seq::U64(vec![])),
    ];
    unpack_values(&buf, &mut dsts)?;
    assert_eq!(dsts, vals);
    Ok(())
}

#[test]
fn truncated_input_is_invalid_param() {
    let buf = pack_values(&[Value::from("name"), Value::I64(i64::MIN)]);
    for cut in 1..buf.len() {
        let mut dsts = [Value::Str(String::new()), Value::I64(0)];
        let res = unpack_values(&buf[..cut], &mut dsts);
        assert!(matches!(res, Err(PackErr::InvalidParam(_))), "cut at {}", cut);
    }
}
