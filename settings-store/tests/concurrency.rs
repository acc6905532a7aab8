use std::sync::{Arc, Barrier};
use std::thread;

use settings_store::Settings;

const THREADS: usize = 8;
const KEYS_PER_THREAD: usize = 200;

#[test]
fn concurrent_sets_into_one_section_lose_nothing() {
    let settings = Arc::new(Settings::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let settings = Arc::clone(&settings);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..KEYS_PER_THREAD {
                    settings.set("workers", format!("w{worker}-{i}"), i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let section = settings.get_section("workers").unwrap();
    assert_eq!(section.len(), THREADS * KEYS_PER_THREAD);
    assert_eq!(settings.get_int("workers", "w3-150").unwrap(), 150);
}

#[test]
fn readers_and_writers_interleave_across_sections() {
    let settings = Arc::new(Settings::new());
    settings.set("", "counter", 0);

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let settings = Arc::clone(&settings);
            thread::spawn(move || {
                for i in 0..50 {
                    settings.set(&format!("section-{worker}"), format!("k{i}"), true);
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let settings = Arc::clone(&settings);
            thread::spawn(move || {
                for _ in 0..50 {
                    let rendered = settings.render();
                    assert!(rendered.starts_with("counter = 0\n"));
                    let _ = settings.section_names();
                }
            })
        })
        .collect();
    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(settings.section_names().len(), 5);
    for worker in 0..4 {
        assert_eq!(
            settings
                .get_section(&format!("section-{worker}"))
                .unwrap()
                .len(),
            50
        );
    }
}
