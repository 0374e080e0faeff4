#[cfg(test)]
mod test {
    use super::super::*;
    use crate::PackErr;
    use anyhow::Result;

    #[test]
    fn ints_round_trip() -> Result<()> {
        let vals = vec![Value::I32(1), Value::I32(-2), Value::I32(300)];
        let buf = pack_formatted("3i", &vals)?;
        assert_eq!(buf.len(), packed_size("3i", &vals)?);

        let mut dsts = vec![Value::I32(0); 3];
        unpack_formatted("3i", &buf, &mut dsts)?;
        assert_eq!(dsts, vals);
        Ok(())
    }

    #[test]
    fn fixed_text() -> Result<()> {
        assert_eq!(pack_formatted("5s", &[Value::from("ab")])?, b"ab\0\0\0");
        assert_eq!(pack_formatted("5s", &[Value::from("abcdef")])?, b"abcde");
        Ok(())
    }

    #[test]
    fn fixed_text_cut_mid_char_round_trips() -> Result<()> {
        let buf = pack_formatted("5s", &[Value::from("abcdé")])?;
        assert_eq!(buf, b"abcd\xc3");

        let mut dsts = vec![Value::Str(String::new())];
        unpack_formatted("5s", &buf, &mut dsts)?;
        assert_eq!(dsts, vec![Value::from("abcd")]);
        Ok(())
    }

    #[test]
    fn nul_text() -> Result<()> {
        assert_eq!(pack_formatted("S", &[Value::from("hello")])?, b"hello\0");
        assert_eq!(pack_formatted("S", &[Value::from("")])?, vec![0u8]);
        Ok(())
    }

    #[test]
    fn padding_consumes_no_value() -> Result<()> {
        assert_eq!(pack_formatted("3x", &[])?, vec![0u8; 3]);
        assert_eq!(
            pack_formatted("B2xB", &[Value::U8(1), Value::U8(2)])?,
            vec![1u8, 0, 0, 2]
        );

        let mut dsts = vec![Value::U8(0); 2];
        unpack_formatted("B2xB", &[1, 0xee, 0xee, 2], &mut dsts)?;
        assert_eq!(dsts, vec![Value::U8(1), Value::U8(2)]);
        Ok(())
    }

    #[test]
    fn missing_values_fail_and_clear() {
        let mut buf = vec![1, 2, 3];
        let res = pack_formatted_into("BB", &mut buf, &[Value::U8(1)]);
        assert!(res.is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn mismatch_fails_and_clears() {
        let mut buf = vec![];
        let vals = ["ok".into(), Value::U32(1), Value::I32(1)];
        let res = pack_formatted_into("Sii", &mut buf, &vals);
        assert!(res.is_err());
        assert!(buf.is_empty());
    }

    /// Extra values are tolerated; only as many as the format names are packed.
    #[test]
    fn extra_values_are_ignored() -> Result<()> {
        let buf = pack_formatted("B", &[Value::U8(7), Value::U8(8)])?;
        assert_eq!(buf, vec![7u8]);
        Ok(())
    }

    #[test]
    fn oversized_formats_fail_without_panicking() {
        let huge_pad = format!("{}x", usize::MAX);
        let overflowing_pads = format!("{}x1x", usize::MAX);
        let huge_blob = format!("{}u", usize::MAX / 2 + 1);
        let cases = [
            (huge_pad.as_str(), vec![]),
            (overflowing_pads.as_str(), vec![]),
            (huge_blob.as_str(), vec![Value::from(vec![1u8])]),
        ];
        for (fmt, vals) in cases {
            let mut buf = vec![0xff];
            let res = pack_formatted_into(fmt, &mut buf, &vals);
            assert!(matches!(res, Err(PackErr::InvalidParam(_))), "{}", fmt);
            assert!(buf.is_empty());
        }
        assert!(packed_size(&overflowing_pads, &[]).is_err());
    }

    #[test]
    fn reuses_buffer() -> Result<()> {
        let mut buf = vec![0xff; 16];
        pack_formatted_into("H", &mut buf, &[Value::U16(1)])?;
        assert_eq!(buf, vec![0x81u8]);
        Ok(())
    }

    #[test]
    fn mixed_record() -> Result<()> {
        let fmt = ".SQu";
        let vals = vec![
            Value::from("key"),
            Value::U64(1 << 40),
            Value::from(vec![1u8, 2, 3, 4]),
        ];
        let buf = pack_formatted(fmt, &vals)?;
        assert_eq!(buf.len(), packed_size(fmt, &vals)?);

        let mut dsts = vec![
            Value::Str(String::new()),
            Value::U64(0),
            Value::Bytes(vec![]),
        ];
        unpack_formatted(fmt, &buf, &mut dsts)?;
        assert_eq!(dsts, vals);
        Ok(())
    }

    #[test]
    fn prefixed_blob_then_more() -> Result<()> {
        let fmt = "uuq";
        let vals = vec![
            Value::from(vec![1u8, 2]),
            Value::from(vec![3u8; 70]),
            Value::I64(-5),
        ];
        let buf = pack_formatted(fmt, &vals)?;

        let mut dsts = vec![Value::Bytes(vec![]), Value::Bytes(vec![]), Value::I64(0)];
        unpack_formatted(fmt, &buf, &mut dsts)?;
        assert_eq!(dsts, vals);
        Ok(())
    }

    #[test]
    fn unpack_failures() {
        /* Empty input. */
        let mut dsts = vec![Value::I32(0)];
        assert!(unpack_formatted("i", &[], &mut dsts).is_err());

        /* Too few destinations. */
        let mut dsts = vec![Value::U8(0)];
        assert!(unpack_formatted("BB", &[1, 2], &mut dsts).is_err());
        assert_eq!(dsts, vec![Value::U8(1)]);

        /* Truncated varint. */
        let mut dsts = vec![Value::U64(0)];
        assert!(unpack_formatted("Q", &[0xe3, 0x01], &mut dsts).is_err());

        /* Padding beyond the end. */
        let mut dsts = vec![Value::U8(0)];
        assert!(unpack_formatted("B4x", &[1, 0], &mut dsts).is_err());

        /* Bad format. */
        let mut dsts = vec![Value::U8(0)];
        assert!(unpack_formatted("<B", &[1], &mut dsts).is_err());
    }

    #[test]
    fn earlier_destinations_are_kept_on_failure() {
        let buf = [0x81, 0x82, 0xe3];
        let mut dsts = vec![Value::U32(0), Value::U32(0), Value::U32(0)];
        assert!(unpack_formatted("3I", &buf, &mut dsts).is_err());
        assert_eq!(dsts[0], Value::U32(1));
        assert_eq!(dsts[1], Value::U32(2));
    }
}
