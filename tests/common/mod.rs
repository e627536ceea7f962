use intcode::mach::{Event, Program, Runtime, Word};

pub fn load(text: &str) -> Runtime {
    Runtime::new(Program::load(text).unwrap())
}

pub fn exec(runtime: &mut Runtime) -> (Vec<Word>, Event) {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> (Vec<Word>, Event) {
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

/// Runs `text` with `inputs` queued and expects it to halt.
pub fn run_with(text: &str, inputs: &[Word]) -> Vec<Word> {
    let mut r = load(text);
    r.input().send_all(inputs.iter().copied());
    let (output, event) = exec(&mut r);
    assert_eq!(event, Event::Halted);
    output
}
