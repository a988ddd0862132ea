//! Failed conversions must release every buffer they allocated.
//!
//! A counting global allocator tracks live bytes per thread, so tests running
//! in parallel do not disturb each other's counts.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::io::Cursor;

use mmcrs::{read_coordinate_general, read_header, skip_comments, LineReader, MmError};

struct CountingAllocator;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        adjust(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            adjust(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn live_bytes() -> isize {
    LIVE_BYTES.with(|live| live.get())
}

/// Bytes still held after running `convert` on a reader positioned at the body
fn leaked_by_conversion(text: &'static str) -> (isize, bool) {
    let mut reader = LineReader::new(Cursor::new(text.as_bytes())).unwrap();
    read_header(&mut reader).unwrap();
    skip_comments(&mut reader).unwrap();

    let before = live_bytes();
    let failed = {
        let result = read_coordinate_general(&mut reader);
        matches!(result, Err(MmError::MalformedTripletLine { .. }))
    };
    let after = live_bytes();

    (after - before, failed)
}

#[test]
fn test_malformed_entry_releases_arrays() {
    let text = "%%MatrixMarket matrix coordinate real general\n% leak check\n64 64 3\n1 1 5.0\n2 2 3.0\n9 9\n";
    let (leaked, failed) = leaked_by_conversion(text);

    assert!(failed, "conversion should fail on the short entry line");
    assert_eq!(leaked, 0, "{} bytes left allocated after a failed conversion", leaked);
}

#[test]
fn test_successful_conversion_releases_on_drop() {
    let text = "%%MatrixMarket matrix coordinate real general\n32 32 2\n1 1 5.0\n2 2 3.0\n";
    let mut reader = LineReader::new(Cursor::new(text.as_bytes())).unwrap();
    read_header(&mut reader).unwrap();
    skip_comments(&mut reader).unwrap();

    let before = live_bytes();
    let matrix = read_coordinate_general(&mut reader).unwrap();
    assert!(live_bytes() > before);

    drop(matrix);
    assert_eq!(live_bytes(), before);
}
