use crate::lang::{parse, ErrorCode};
use crate::mach::{Pipeline, Topology};

const FEEDBACK: &str =
    "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5";

#[test]
fn test_chain() {
    let image = parse("3,23,3,24,1002,24,10,24,1002,23,-1,23,101,5,23,23,1,24,23,23,4,23,99,0,0")
        .unwrap();
    let out = Pipeline::amplifiers(&image, &[0, 1, 2, 3, 4], Topology::Chain)
        .run(vec![0])
        .unwrap();
    assert_eq!(out, vec![54321]);
}

#[test]
fn test_feedback_loop() {
    let image = parse(FEEDBACK).unwrap();
    let out = Pipeline::amplifiers(&image, &[9, 8, 7, 6, 5], Topology::Loop)
        .run(vec![0])
        .unwrap();
    assert_eq!(out, vec![139629729]);
}

#[test]
fn test_failure_cancels_siblings() {
    // Left alone, the first stage would wait for input forever.
    let pipeline = Pipeline::new(Topology::Loop)
        .stage(parse("3,10,3,10,4,10,1105,1,0").unwrap(), None)
        .stage(parse("3,0,5000").unwrap(), None);
    let e = pipeline.run(vec![1, 2]).unwrap_err();
    assert_eq!(e.code(), ErrorCode::UnknownOpcode);
    assert_eq!(e.address(), Some(2));
}

#[test]
fn test_halted_writer_closes_reader() {
    let pipeline = Pipeline::new(Topology::Chain)
        .stage(parse("99").unwrap(), None)
        .stage(parse("3,0,99").unwrap(), None);
    let e = pipeline.run(None).unwrap_err();
    assert!(e.is_cancelled());
}

#[test]
fn test_duplex_controller() {
    // Doubles every value until it reads a zero.
    let image = parse("3,20,1006,20,14,1002,20,2,20,4,20,1105,1,0,99").unwrap();
    let handle = Pipeline::new(Topology::Chain)
        .stage(image, None)
        .spawn(None)
        .unwrap();
    let mut seen = vec![];
    for n in 1..=3 {
        handle.input().send(n);
        seen.push(handle.output().receive().unwrap());
    }
    handle.input().send(0);
    assert!(handle.output().receive().unwrap_err().is_cancelled());
    handle.join().unwrap();
    assert_eq!(seen, vec![2, 4, 6]);
}

#[test]
fn test_cancel() {
    let handle = Pipeline::new(Topology::Chain)
        .stage(parse("3,0,99").unwrap(), None)
        .spawn(None)
        .unwrap();
    handle.cancel();
    assert!(handle.join().unwrap_err().is_cancelled());
}

#[test]
fn test_empty() {
    let e = Pipeline::new(Topology::Chain).run(None).unwrap_err();
    assert_eq!(e.code(), ErrorCode::InternalError);
}
