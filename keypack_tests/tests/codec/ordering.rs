use anyhow::Result;
use itertools::Itertools;
use keypack_codec::{pack_formatted, unpack_formatted, Value};
use rand::Rng;

fn gen_i64(rng: &mut impl Rng) -> i64 {
    let shift = rng.gen_range(0..64);
    rng.gen::<i64>() >> shift
}
fn gen_u64(rng: &mut impl Rng) -> u64 {
    let shift = rng.gen_range(0..64);
    rng.gen::<u64>() >> shift
}

/// Composite keys sort bytewise in the same order as their fields sort as tuples.
#[test]
fn composite_keys_sort_like_tuples() -> Result<()> {
    let mut rng = rand::thread_rng();

    let mut rows = (0..2_000)
        .map(|_| {
            let name = ["", "a", "ab", "b", "ba"][rng.gen_range(0..5)];
            (String::from(name), gen_i64(&mut rng), gen_u64(&mut rng))
        })
        .collect::<Vec<_>>();

    let mut keyed = rows
        .iter()
        .map(|(name, i, u)| {
            let vals = [Value::from(name.as_str()), Value::I64(*i), Value::U64(*u)];
            pack_formatted("SqQ", &vals).map(|key| (key, (name.clone(), *i, *u)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    let by_key = keyed.into_iter().map(|(_, row)| row).collect::<Vec<_>>();
    assert_eq!(rows, by_key);
    Ok(())
}

#[test]
fn signed_bytes_sort_like_numbers() -> Result<()> {
    let keys = (i8::MIN..=i8::MAX)
        .map(|x| pack_formatted("b", &[Value::I8(x)]))
        .collect::<Result<Vec<_>, _>>()?;
    for (a, b) in keys.iter().tuple_windows() {
        assert!(a < b, "{:?} {:?}", a, b);
    }
    Ok(())
}

#[test]
fn every_width_letter_round_trips() -> Result<()> {
    let mut rng = rand::thread_rng();
    for _ in 0..1_000 {
        let (i, u) = (gen_i64(&mut rng), gen_u64(&mut rng));
        let vals = [
            Value::I64(i),
            Value::I64(i),
            Value::I64(i),
            Value::I64(i),
            Value::U64(u),
            Value::U64(u),
            Value::U64(u),
            Value::U64(u),
            Value::U64(u),
        ];
        let buf = pack_formatted("hilqHILQr", &vals)?;

        let mut dsts = vec![Value::I64(0); 4];
        dsts.extend(vec![Value::U64(0); 5]);
        unpack_formatted("hilqHILQr", &buf, &mut dsts)?;
        assert_eq!(&dsts[..], &vals[..]);
    }
    Ok(())
}
