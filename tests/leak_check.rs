use grove::{BlockingQueue, Locked, OrderedMap};

mod alloc {
    use std::alloc::{Layout, System};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[global_allocator]
    static ALLOCATOR: Alloc = Alloc;

    static RESIDENT: AtomicUsize = AtomicUsize::new(0);

    // megabyte granularity: one-time runtime tables (lock parking
    // lots, thread caches) stay below the threshold
    pub fn resident() -> usize {
        RESIDENT.load(Ordering::Relaxed) / 1_000_000
    }

    #[derive(Default, Debug, Clone, Copy)]
    struct Alloc;

    unsafe impl std::alloc::GlobalAlloc for Alloc {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ret = System.alloc(layout);
            assert_ne!(
                ret,
                std::ptr::null_mut(),
                "alloc returned null pointer for layout {layout:?}"
            );
            RESIDENT.fetch_add(layout.size(), Ordering::Relaxed);
            std::ptr::write_bytes(ret, 0xa1, layout.size());
            ret
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            std::ptr::write_bytes(ptr, 0xde, layout.size());
            RESIDENT.fetch_sub(layout.size(), Ordering::Relaxed);
            System.dealloc(ptr, layout)
        }
    }
}

#[test]
fn leak_check() {
    let n: u32 = 16 * 1024;

    let concurrency = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(8);

    let resident_before = alloc::resident();

    // churn a shared map and a bounded queue through their whole
    // lifecycle, then drop everything
    let map: Locked<OrderedMap<u32, Vec<u8>>> = Locked::default();
    let queue: std::sync::Arc<BlockingQueue<Vec<u8>>> =
        std::sync::Arc::new(BlockingQueue::bounded(128).unwrap());

    std::thread::scope(|s| {
        for low_bits in 0..concurrency as u32 {
            let map_2 = map.clone();
            let queue_2 = queue.clone();
            s.spawn(move || {
                let shift = concurrency.next_power_of_two().trailing_zeros();
                let unique_key = |key| (key << shift) | low_bits;

                for key in 0..n {
                    let i = unique_key(key);
                    map_2.insert(i, vec![low_bits as u8; 16]);
                    queue_2.put(vec![low_bits as u8; 16]);
                    assert_eq!(queue_2.get().len(), 16);
                }
                for key in 0..n {
                    let i = unique_key(key);
                    assert!(map_2.remove(&i), "key {i} vanished");
                }
            });
        }
    });

    assert!(map.is_empty());
    assert!(queue.is_empty());
    drop(map);
    drop(queue);

    let resident_after = alloc::resident();

    assert_eq!(
        resident_after.saturating_sub(resident_before),
        0,
        "leaked {}mb",
        resident_after - resident_before
    );
}
