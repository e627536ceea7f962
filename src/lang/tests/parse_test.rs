use super::*;
use crate::lang::ErrorCode;

fn parse_err(s: &str) -> Option<Error> {
    match parse(s) {
        Ok(_) => None,
        Err(e) => Some(e),
    }
}

#[test]
fn test_simple() {
    assert_eq!(parse("1,9,10,3,2,3,11,0,99,30,40,50").unwrap().len(), 12);
    assert_eq!(parse("104,1125899906842624,99").unwrap(), vec![104, 1125899906842624, 99]);
}

#[test]
fn test_signed() {
    assert_eq!(parse("1101,100,-1,4,0").unwrap(), vec![1101, 100, -1, 4, 0]);
    assert_eq!(parse("+7").unwrap(), vec![7]);
}

#[test]
fn test_single_trim() {
    assert_eq!(parse("  3,0,4,0,99\n").unwrap(), vec![3, 0, 4, 0, 99]);
    assert_eq!(parse("3,0,4,0,99\r\n").unwrap(), vec![3, 0, 4, 0, 99]);
}

#[test]
fn test_malformed() {
    let e = parse_err("1,2,x,4").unwrap();
    assert_eq!(e.code(), ErrorCode::MalformedProgramText);
    assert_eq!(e.column(), 4..5);
    let e = parse_err("1, 2").unwrap();
    assert_eq!(e.code(), ErrorCode::MalformedProgramText);
    assert_eq!(e.column(), 2..4);
    assert!(parse_err("1,,2").is_some());
    assert!(parse_err("1,2,").is_some());
    assert!(parse_err(",1").is_some());
    assert!(parse_err("").is_some());
    assert!(parse_err("99999999999999999999").is_some());
}
