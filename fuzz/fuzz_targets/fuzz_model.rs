#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate arbitrary;
extern crate grove;

use arbitrary::Arbitrary;

const KEYSPACE: u64 = 128;

#[derive(Debug)]
enum Op {
    Insert { key: u64, value: u64 },
    Remove { key: u64 },
    Replace { key: u64, value: u64 },
    Get { key: u64 },
}

impl<'a> Arbitrary<'a> for Op {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(if u.ratio(1, 2)? {
            Op::Insert {
                key: u.int_in_range(0..=KEYSPACE)?,
                value: u.int_in_range(0..=KEYSPACE)?,
            }
        } else if u.ratio(1, 2)? {
            Op::Remove {
                key: u.int_in_range(0..=KEYSPACE)?,
            }
        } else if u.ratio(1, 2)? {
            Op::Replace {
                key: u.int_in_range(0..=KEYSPACE)?,
                value: u.int_in_range(0..=KEYSPACE)?,
            }
        } else {
            Op::Get {
                key: u.int_in_range(0..=KEYSPACE)?,
            }
        })
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut tree = grove::OrderedMap::new();
    let mut model = std::collections::BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert { key, value } => {
                let vacant = !model.contains_key(&key);
                if vacant {
                    model.insert(key, value);
                }
                assert_eq!(tree.insert(key, value), vacant);
            }
            Op::Remove { key } => {
                assert_eq!(tree.remove(&key), model.remove(&key).is_some());
            }
            Op::Replace { key, value } => {
                let present = model.contains_key(&key);
                if present {
                    model.insert(key, value);
                }
                assert_eq!(tree.replace(&key, value), present);
            }
            Op::Get { key } => {
                assert_eq!(tree.get(&key), model.get(&key));
            }
        };

        tree.check_invariants();

        for (key, value) in &model {
            assert_eq!(tree.get(key), Some(value));
        }
    }

    let mut model_iter = model.iter();
    let mut tree_iter = tree.iter();

    for (k1, v1) in &mut model_iter {
        let (k2, v2) = tree_iter.next().unwrap();
        assert_eq!((k1, v1), (k2, v2));
    }

    assert_eq!(tree_iter.next(), None);
});
