#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate arbitrary;
extern crate grove;

use arbitrary::Arbitrary;

#[derive(Debug, Arbitrary)]
enum Op {
    Put(u8),
    Get,
    Peek,
    Clear,
}

fuzz_target!(|input: (u8, Vec<Op>)| {
    let (raw_capacity, ops) = input;
    let capacity = usize::from(raw_capacity % 16) + 1;

    let mut ring = grove::RingBuffer::new(capacity).unwrap();
    let mut model = std::collections::VecDeque::new();

    for op in ops {
        match op {
            Op::Put(item) => {
                if model.len() == capacity {
                    assert_eq!(ring.try_put(item), Err(item));
                } else {
                    assert_eq!(ring.try_put(item), Ok(()));
                    model.push_back(item);
                }
            }
            Op::Get => {
                assert_eq!(ring.try_get(), model.pop_front());
            }
            Op::Peek => {
                assert_eq!(ring.peek(), model.front());
            }
            Op::Clear => {
                ring.clear();
                model.clear();
            }
        }

        assert_eq!(ring.len(), model.len());
        assert_eq!(ring.is_full(), model.len() == capacity);
        assert_eq!(
            ring.to_vec(),
            model.iter().copied().collect::<Vec<u8>>()
        );
    }
});
