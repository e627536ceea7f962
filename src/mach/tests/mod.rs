use crate::lang::parse;
use crate::mach::{Channel, Event, Program, Runtime, Word};

mod engine_test;
mod pipeline_test;

fn load(text: &str) -> Runtime {
    Runtime::new(Program::new(parse(text).unwrap(), Channel::new(), Channel::new()))
}

fn run(runtime: &mut Runtime) -> (Vec<Word>, Event) {
    run_cycles(runtime, 5000)
}

/// Runs cooperatively until the program stops or needs input. Two full
/// slices in a row count as a runaway program.
fn run_cycles(runtime: &mut Runtime, cycles: usize) -> (Vec<Word>, Event) {
    let mut output = vec![];
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        output.append(&mut runtime.output().drain());
        match event {
            Event::Running => {
                if prev_running {
                    panic!("{} execution cycles exceeded", cycles);
                }
                prev_running = true;
            }
            event => return (output, event),
        }
    }
}

fn exec(text: &str, inputs: &[Word]) -> Vec<Word> {
    let mut r = load(text);
    r.input().send_all(inputs.iter().copied());
    let (output, event) = run(&mut r);
    assert_eq!(event, Event::Halted);
    output
}
