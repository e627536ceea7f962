use super::*;
use crate::lang::ErrorCode;
use crate::mach::{Instruction, Memory, Operation, Outcome, Registers, State, Wait};

fn step(memory: &mut Memory, registers: Registers, input: &Channel) -> Outcome {
    let ins = Instruction::decode(memory, registers.instruction_pointer).unwrap();
    Operation::execute(&ins, memory, registers, input, &Channel::new(), Wait::Yield).unwrap()
}

#[test]
fn test_one_add_cycle() {
    let mut mem = Memory::new(vec![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
    let next = step(&mut mem, Registers::default(), &Channel::new());
    assert_eq!(mem.read(3).unwrap(), 70);
    assert_eq!(
        next,
        Outcome::Next(Registers {
            instruction_pointer: 4,
            relative_base: 0
        })
    );
}

#[test]
fn test_day_2_programs() {
    let mut r = load("1,9,10,3,2,3,11,0,99,30,40,50");
    assert_eq!(run(&mut r).1, Event::Halted);
    assert_eq!(r.program().memory().read(0).unwrap(), 3500);

    let mut r = load("1,1,1,4,99,5,6,0,99");
    run(&mut r);
    assert_eq!(r.program().memory().image(), &[30, 1, 1, 4, 2, 5, 6, 0, 99]);

    let mut r = load("2,4,4,5,99,0");
    run(&mut r);
    assert_eq!(r.program().memory().image(), &[2, 4, 4, 5, 99, 9801]);
}

#[test]
fn test_immediate_and_negative() {
    let mut r = load("1002,4,3,4,33");
    run(&mut r);
    assert_eq!(r.program().memory().read(4).unwrap(), 99);
    let mut r = load("1101,100,-1,4,0");
    assert_eq!(run(&mut r).1, Event::Halted);
    assert_eq!(r.program().memory().read(4).unwrap(), 99);
}

#[test]
fn test_jump_takes_operand_through_its_mode() {
    // JNZ [5], [6] where mem[5] = 1 and mem[6] = 7 lands on the output at 7.
    let mut mem = Memory::new(vec![5, 5, 6, 99, 99, 1, 7, 104, 1, 99]);
    let next = step(&mut mem, Registers::default(), &Channel::new());
    assert_eq!(
        next,
        Outcome::Next(Registers {
            instruction_pointer: 7,
            relative_base: 0
        })
    );
}

#[test]
fn test_jump_not_taken() {
    let mut mem = Memory::new(vec![1106, 1, 50, 99]);
    let next = step(&mut mem, Registers::default(), &Channel::new());
    assert_eq!(
        next,
        Outcome::Next(Registers {
            instruction_pointer: 3,
            relative_base: 0
        })
    );
}

#[test]
fn test_adjust_relative_base() {
    let mut mem = Memory::new(vec![109, 19, 99]);
    let regs = Registers {
        instruction_pointer: 0,
        relative_base: 2000,
    };
    let next = step(&mut mem, regs, &Channel::new());
    assert_eq!(
        next,
        Outcome::Next(Registers {
            instruction_pointer: 2,
            relative_base: 2019
        })
    );
}

#[test]
fn test_relative_write_past_end() {
    assert_eq!(exec("109,1000,21101,3,4,5,204,5,99", &[]), vec![7]);
    let mut r = load("109,1000,21101,3,4,5,204,5,99");
    run(&mut r);
    assert_eq!(r.program().memory().read(1005).unwrap(), 7);
    assert_eq!(r.program().memory().read(1006).unwrap(), 0);
}

#[test]
fn test_input_yield_leaves_state() {
    let mut mem = Memory::new(vec![3, 0, 99]);
    let before = mem.clone();
    assert_eq!(
        step(&mut mem, Registers::default(), &Channel::new()),
        Outcome::Blocked
    );
    assert_eq!(mem, before);
    let next = step(&mut mem, Registers::default(), &Channel::with_values(vec![42]));
    assert!(matches!(next, Outcome::Next(_)));
    assert_eq!(mem.read(0).unwrap(), 42);
}

#[test]
fn test_unknown_opcode_fails_without_writes() {
    let mut r = load("5000,1,2,3");
    let before = r.program().memory().clone();
    let (_, event) = run(&mut r);
    let e = match event {
        Event::Failed(e) => e,
        event => panic!("{:?}", event),
    };
    assert_eq!(e.code(), ErrorCode::UnknownOpcode);
    assert_eq!(e.address(), Some(0));
    assert_eq!(e.opcode(), Some(5000));
    assert_eq!(r.program().memory(), &before);
    assert_eq!(r.program().state(), &State::Failed(e));
}

#[test]
fn test_invalid_parameter_mode() {
    let mut r = load("301,0,0,0,99");
    match run(&mut r).1 {
        Event::Failed(e) => assert_eq!(e.code(), ErrorCode::InvalidParameterMode),
        event => panic!("{:?}", event),
    }
}

#[test]
fn test_invalid_write_target() {
    let mut r = load("11101,1,1,0,99");
    match run(&mut r).1 {
        Event::Failed(e) => {
            assert_eq!(e.code(), ErrorCode::InvalidWriteTarget);
            assert_eq!(e.address(), Some(0));
            assert_eq!(e.opcode(), Some(11101));
        }
        event => panic!("{:?}", event),
    }
    assert_eq!(r.program().memory().read(0).unwrap(), 11101);
}

#[test]
fn test_negative_address() {
    let mut r = load("1101,0,0,3,4,-1,99");
    match run(&mut r).1 {
        Event::Failed(e) => {
            assert_eq!(e.code(), ErrorCode::NegativeAddress);
            assert_eq!(e.address(), Some(4));
            assert_eq!(e.value(), Some(-1));
        }
        event => panic!("{:?}", event),
    }
}

#[test]
fn test_negative_jump() {
    let mut r = load("1105,1,-4,99");
    match run(&mut r).1 {
        Event::Failed(e) => assert_eq!(e.code(), ErrorCode::NegativeAddress),
        event => panic!("{:?}", event),
    }
}

#[test]
fn test_overflow() {
    let mut r = load("1102,9223372036854775807,2,0,99");
    match run(&mut r).1 {
        Event::Failed(e) => assert_eq!(e.code(), ErrorCode::Overflow),
        event => panic!("{:?}", event),
    }
}

#[test]
fn test_terminal_states_stick() {
    let mut r = load("99");
    assert_eq!(run(&mut r).1, Event::Halted);
    assert_eq!(r.execute(10), Event::Halted);
    assert_eq!(r.program().registers().instruction_pointer, 0);

    let mut r = load("0");
    let first = run(&mut r).1;
    assert!(matches!(first, Event::Failed(_)));
    assert_eq!(r.execute(10), first);
}
