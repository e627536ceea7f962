extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use clap::Parser;
use intcode::error;
use intcode::lang::{parse, read_value, read_values, write_value, Error, Word};
use intcode::mach::{Channel, Event, Listing, Pipeline, Program, Runtime, Topology};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "intcode", version)]
#[command(about = "Runs an Intcode program, one integer per line in and out")]
struct Cli {
    /// Program text: comma separated integers
    file: PathBuf,

    /// Values queued on the input before the program starts
    #[arg(short, long)]
    input: Vec<String>,

    /// Phase settings; runs one copy of the program per phase, chained
    #[arg(long)]
    phases: Option<String>,

    /// Feed the last amplifier back into the first
    #[arg(long, requires = "phases")]
    feedback: bool,

    /// Print a disassembly instead of running
    #[arg(long)]
    list: bool,

    /// Instructions per slice between interrupt checks
    #[arg(long, default_value_t = 5000)]
    cycles: usize,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(&cli, interrupted) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "intcode=warn",
        1 => "intcode=debug",
        _ => "intcode=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main_loop(cli: &Cli, interrupted: Arc<AtomicBool>) -> Result<(), Error> {
    let text = std::fs::read_to_string(&cli.file)?;
    let image = parse(&text)?;
    if cli.list {
        print!("{}", Listing::disassemble(&image));
        return Ok(());
    }
    let inputs = read_values(&cli.input.join(","))?;
    match &cli.phases {
        Some(phases) => {
            let topology = if cli.feedback {
                Topology::Loop
            } else {
                Topology::Chain
            };
            run_pipeline(&image, &read_values(phases)?, topology, inputs, interrupted)
        }
        None => run_program(image, inputs, cli.cycles, interrupted),
    }
}

fn run_pipeline(
    image: &[Word],
    phases: &[Word],
    topology: Topology,
    inputs: Vec<Word>,
    interrupted: Arc<AtomicBool>,
) -> Result<(), Error> {
    let handle = Pipeline::amplifiers(image, phases, topology).spawn(inputs)?;
    while !handle.is_finished() {
        if interrupted.load(Ordering::SeqCst) {
            debug!("interrupted, cancelling pipeline");
            handle.cancel();
        }
        thread::sleep(Duration::from_millis(10));
    }
    let output = handle.output().clone();
    handle.join()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for value in output.drain() {
        out.write_all(write_value(value).as_bytes())?;
    }
    Ok(())
}

fn run_program(
    image: Vec<Word>,
    inputs: Vec<Word>,
    cycles: usize,
    interrupted: Arc<AtomicBool>,
) -> Result<(), Error> {
    let program = Program::new(image, Channel::with_values(inputs), Channel::new());
    let mut runtime = Runtime::new(program);
    let console = Console::new()?;
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        let event = runtime.execute(cycles);
        for value in runtime.output().drain() {
            console.write_value(value)?;
        }
        match event {
            Event::Running => {}
            Event::Halted => return Ok(()),
            Event::Failed(error) => return Err(error),
            Event::Blocked => match console.read_line()? {
                Line::Input(line) => match read_value(&line) {
                    Ok(Some(value)) => runtime.input().send(value),
                    Ok(None) => {}
                    Err(error) => console.write_error(&error)?,
                },
                Line::Interrupt => runtime.interrupt(),
                Line::Eof => return Err(error!(Cancelled; "END OF INPUT")),
            },
        }
    }
}

enum Line {
    Input(String),
    Interrupt,
    Eof,
}

/// Prompts on a terminal; reads plain lines from a pipe.
struct Console {
    interface: Option<Interface<DefaultTerminal>>,
}

impl Console {
    fn new() -> std::io::Result<Console> {
        if !std::io::stdin().is_terminal() {
            return Ok(Console { interface: None });
        }
        let interface = Interface::new("intcode")?;
        interface.set_prompt("? ")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(Console {
            interface: Some(interface),
        })
    }

    fn read_line(&self) -> std::io::Result<Line> {
        match &self.interface {
            Some(interface) => Ok(match interface.read_line()? {
                ReadResult::Input(string) => {
                    interface.add_history_unique(string.clone());
                    Line::Input(string)
                }
                ReadResult::Signal(Signal::Interrupt) => {
                    interface.set_buffer("")?;
                    Line::Interrupt
                }
                ReadResult::Signal(_) | ReadResult::Eof => Line::Eof,
            }),
            None => {
                let mut string = String::new();
                match std::io::stdin().read_line(&mut string)? {
                    0 => Ok(Line::Eof),
                    _ => Ok(Line::Input(string)),
                }
            }
        }
    }

    fn write_value(&self, value: Word) -> std::io::Result<()> {
        match &self.interface {
            Some(interface) => interface.write_fmt(format_args!("{}", write_value(value))),
            None => std::io::stdout().write_all(write_value(value).as_bytes()),
        }
    }

    fn write_error(&self, error: &Error) -> std::io::Result<()> {
        let s = Style::new().bold().paint(error.to_string());
        match &self.interface {
            Some(interface) => interface.write_fmt(format_args!("{}\n", s)),
            None => {
                eprintln!("{}", s);
                Ok(())
            }
        }
    }
}
