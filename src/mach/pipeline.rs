use super::{Channel, Program, Runtime, Word};
use crate::error;
use crate::lang::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Stage i feeds stage i+1. The caller feeds the first stage and
    /// reads the last.
    Chain,
    /// Like `Chain`, but the last stage feeds the first. The caller's
    /// input and output endpoints are both the first stage's input.
    Loop,
}

struct Stage {
    image: Vec<Word>,
    seeds: Vec<Word>,
}

/// ## Multi-program orchestrator
///
/// Wires programs together with channels and runs each on its own thread,
/// so cyclic topologies need nothing special. When any program fails
/// every channel is closed and the siblings stop with `Cancelled`.
///
/// ```
/// use intcode::lang::parse;
/// use intcode::mach::{Pipeline, Topology};
///
/// let image = parse("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0").unwrap();
/// let signal = Pipeline::amplifiers(&image, &[4, 3, 2, 1, 0], Topology::Chain)
///     .run(vec![0])
///     .unwrap();
/// assert_eq!(signal, vec![43210]);
/// ```

pub struct Pipeline {
    topology: Topology,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(topology: Topology) -> Pipeline {
        Pipeline {
            topology,
            stages: vec![],
        }
    }

    /// Adds a program. Seeds are queued on its input before anything runs.
    pub fn stage<I: IntoIterator<Item = Word>>(mut self, image: Vec<Word>, seeds: I) -> Pipeline {
        self.stages.push(Stage {
            image,
            seeds: seeds.into_iter().collect(),
        });
        self
    }

    /// One copy of `image` per phase setting, each seeded with its phase.
    pub fn amplifiers(image: &[Word], phases: &[Word], topology: Topology) -> Pipeline {
        phases.iter().fold(Pipeline::new(topology), |pipeline, phase| {
            pipeline.stage(image.to_vec(), Some(*phase))
        })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs to completion with `inputs` queued after the first stage's
    /// seeds and returns what is left on the output endpoint.
    pub fn run<I: IntoIterator<Item = Word>>(self, inputs: I) -> Result<Vec<Word>> {
        let handle = self.spawn(inputs)?;
        let output = handle.output.clone();
        handle.join()?;
        Ok(output.drain())
    }

    /// Starts every stage and hands back the external endpoints, for
    /// callers that converse with the programs while they run. `inputs`
    /// are queued behind the first stage's seeds before any stage starts.
    pub fn spawn<I: IntoIterator<Item = Word>>(self, inputs: I) -> Result<Handle> {
        if self.stages.is_empty() {
            return Err(error!(InternalError; "EMPTY PIPELINE"));
        }
        let len = self.stages.len();
        let channels: Vec<Channel> = match self.topology {
            Topology::Chain => (0..=len).map(|_| Channel::new()).collect(),
            Topology::Loop => (0..len).map(|_| Channel::new()).collect(),
        };
        for (stage, channel) in self.stages.iter().zip(&channels) {
            channel.send_all(stage.seeds.iter().copied());
        }
        channels[0].send_all(inputs);
        let input = channels[0].clone();
        let output = match self.topology {
            Topology::Chain => channels[len].clone(),
            Topology::Loop => channels[0].clone(),
        };
        debug!(stages = len, topology = ?self.topology, "starting pipeline");

        let interrupted: Arc<AtomicBool> = Arc::default();
        let mut workers = Vec::with_capacity(len);
        for (index, stage) in self.stages.into_iter().enumerate() {
            let program = Program::new(
                stage.image,
                channels[index].clone(),
                channels[(index + 1) % channels.len()].clone(),
            );
            let runtime = Runtime::with_interrupt(program, interrupted.clone());
            let siblings = channels.clone();
            let spawned = thread::Builder::new()
                .name(format!("intcode-{}", index))
                .spawn(move || Pipeline::worker(index, runtime, siblings));
            match spawned {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    interrupted.store(true, Ordering::SeqCst);
                    channels.iter().for_each(Channel::close);
                    return Err(e.into());
                }
            }
        }
        Ok(Handle {
            input,
            output,
            channels,
            interrupted,
            workers,
        })
    }

    fn worker(index: usize, mut runtime: Runtime, siblings: Vec<Channel>) -> Result<()> {
        let result = runtime.run();
        match &result {
            Ok(()) => {
                debug!(stage = index, "stage halted");
                // Nobody will write here again; let the reader see that.
                runtime.output().close();
            }
            Err(e) => {
                if e.is_cancelled() {
                    debug!(stage = index, error = %e, "stage cancelled");
                } else {
                    tracing::error!(stage = index, error = %e, "stage failed");
                }
                runtime.interrupt();
                siblings.iter().for_each(Channel::close);
            }
        }
        result
    }
}

/// ## Running pipeline

pub struct Handle {
    input: Channel,
    output: Channel,
    channels: Vec<Channel>,
    interrupted: Arc<AtomicBool>,
    workers: Vec<JoinHandle<Result<()>>>,
}

impl Handle {
    /// Feeds the first stage.
    pub fn input(&self) -> &Channel {
        &self.input
    }

    /// Produced by the last stage.
    pub fn output(&self) -> &Channel {
        &self.output
    }

    pub fn cancel(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        self.channels.iter().for_each(Channel::close);
    }

    pub fn is_finished(&self) -> bool {
        self.workers.iter().all(|w| w.is_finished())
    }

    /// Waits for every stage. The first real failure wins over the
    /// cancellations it caused.
    pub fn join(self) -> Result<()> {
        let mut first: Option<Error> = None;
        for worker in self.workers {
            let result = match worker.join() {
                Ok(result) => result,
                Err(_) => Err(error!(InternalError; "STAGE PANICKED")),
            };
            if let Err(e) = result {
                first = match first {
                    Some(f) if !f.is_cancelled() || e.is_cancelled() => Some(f),
                    _ => Some(e),
                };
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
