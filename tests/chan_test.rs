//! Tests for the channel/stream bridge

use std::io::{Read, Write};
use std::sync::mpsc;
use std::thread;

use shellac::{ChanReader, ChanWriter};

#[test]
fn test_chan_reader() {
    let (tx, rx) = mpsc::channel();
    let mut r = ChanReader::new(rx);
    thread::spawn(move || {
        for _ in 0..3 {
            tx.send("hi".to_string()).unwrap();
        }
    });
    let mut p = [0u8; 4];
    for _ in 0..3 {
        let n = r.read(&mut p).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&p[..n], b"hi\n");
    }
    assert_eq!(r.read(&mut p).unwrap(), 0);
}

#[test]
fn test_chan_reader_overflow() {
    let (tx, rx) = mpsc::channel();
    let mut r = ChanReader::new(rx);
    thread::spawn(move || {
        tx.send("hi".to_string()).unwrap();
    });
    let mut p = [0u8; 1];
    for expected in [b"h", b"i", b"\n"] {
        let n = r.read(&mut p).unwrap();
        assert_eq!(n, 1);
        assert_eq!(&p[..n], expected);
    }
    assert_eq!(r.read(&mut p).unwrap(), 0);
}

#[test]
fn test_chan_writer() {
    let (tx, rx) = mpsc::channel();
    let mut w = ChanWriter::new(tx);
    let writer = thread::spawn(move || {
        for _ in 0..3 {
            w.write_all(b"hi\n").unwrap();
        }
        w.close().unwrap();
    });
    for _ in 0..3 {
        assert_eq!(rx.recv().unwrap(), "hi");
    }
    assert!(rx.recv().is_err());
    writer.join().unwrap();
}

#[test]
fn test_chan_writer_overflow() {
    let (tx, rx) = mpsc::channel();
    let mut w = ChanWriter::new(tx);
    thread::spawn(move || {
        w.write_all(b"hi\nhi\nhi\n").unwrap();
        w.close().unwrap();
    });
    let lines: Vec<String> = rx.iter().collect();
    assert_eq!(lines, ["hi", "hi", "hi"]);
}

#[test]
fn test_chan_writer_underflow() {
    let (tx, rx) = mpsc::channel();
    let mut w = ChanWriter::new(tx);
    thread::spawn(move || {
        for b in [b'h', b'i', b'\n'] {
            w.write_all(&[b]).unwrap();
        }
        w.close().unwrap();
    });
    assert_eq!(rx.recv().unwrap(), "hi");
    assert!(rx.recv().is_err());
}

#[test]
fn test_reader_to_writer_round_trip() {
    let (in_tx, in_rx) = mpsc::channel();
    let (out_tx, out_rx) = mpsc::channel();
    for line in ["one", "two", ""] {
        in_tx.send(line.to_string()).unwrap();
    }
    drop(in_tx);

    let mut reader = ChanReader::new(in_rx);
    let mut writer = ChanWriter::new(out_tx);
    std::io::copy(&mut reader, &mut writer).unwrap();
    writer.close().unwrap();

    let lines: Vec<String> = out_rx.iter().collect();
    assert_eq!(lines, ["one", "two", ""]);
}
