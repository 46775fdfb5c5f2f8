//! Execution engine.
//!
//! [`Machine`] owns every piece of VM state. Each step fetches the byte under
//! the source pointer, dispatches it, then advances the source pointer by one
//! whatever the instruction did to it. The run ends as soon as the pointer is
//! at or past the end of the source pool.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{EofPolicy, VmConfig};
use crate::error::VmError;
use crate::io::HostIo;
use crate::isa::Instruction;
use crate::marker::{self, Direction, MarkerState};
use crate::pools::{Pental, Pool};
use crate::weave::weave;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Halt {
    /// The source pointer left the source pool.
    EndOfSource,
    /// The configured step limit was reached.
    StepLimit,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Source bytes fetched, inert ones included.
    pub steps: u64,
    /// Bytes obtained by read instructions (end-of-input results excluded).
    pub bytes_read: u64,
    /// Bytes emitted by write instructions.
    pub bytes_written: u64,
    /// Why the run stopped.
    pub halt: Halt,
}

/// Copy of all VM-visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Register A.
    pub a: u8,
    /// Active marker.
    pub marker: MarkerState,
    /// Source pool and source pointer.
    pub source: Pool,
    /// Wheel pool and wheel pointer.
    pub wheel: Pool,
    /// Pental pool and pental pointer.
    pub pental: Pental,
}

/// The VM context.
#[derive(Debug, Clone)]
pub struct Machine {
    a: u8,
    marker: MarkerState,
    source: Pool,
    wheel: Pool,
    pental: Pental,
    config: VmConfig,
    steps: u64,
    bytes_read: u64,
    bytes_written: u64,
}

impl Machine {
    /// A machine ready to run `program` from its first byte.
    pub fn new(program: impl Into<Vec<u8>>, config: VmConfig) -> Self {
        Self {
            a: 0,
            marker: MarkerState::default(),
            source: Pool::new(program.into()),
            wheel: Pool::wheel(),
            pental: Pental::new(),
            config,
            steps: 0,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    /// Register A.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Active marker state.
    pub fn marker(&self) -> MarkerState {
        self.marker
    }

    /// The pool currently being executed.
    pub fn source(&self) -> &Pool {
        &self.source
    }

    /// The pool currently acting as the wheel.
    pub fn wheel(&self) -> &Pool {
        &self.wheel
    }

    /// The pental ring.
    pub fn pental(&self) -> &Pental {
        &self.pental
    }

    /// Steps executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True once the source pointer has left the source pool.
    pub fn halted(&self) -> bool {
        self.source.exhausted()
    }

    /// Copy out the VM-visible state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            a: self.a,
            marker: self.marker,
            source: self.source.clone(),
            wheel: self.wheel.clone(),
            pental: self.pental.clone(),
        }
    }

    /// Execute one fetch/dispatch/advance cycle. Returns `Ok(false)` without
    /// doing anything if the machine had already halted.
    pub fn step<H: HostIo>(&mut self, io: &mut H) -> Result<bool, VmError> {
        let Some(byte) = self.source.fetch() else {
            return Ok(false);
        };
        if let Some(instruction) = Instruction::decode(byte) {
            trace!(
                offset = self.source.cursor(),
                op = %(byte as char),
                a = self.a,
                "dispatch"
            );
            self.execute(instruction, io)?;
        }
        self.source.advance();
        self.steps += 1;
        Ok(true)
    }

    /// Run until the source is exhausted or the step limit is hit.
    pub fn run<H: HostIo>(&mut self, io: &mut H) -> Result<RunReport, VmError> {
        debug!(
            program_len = self.source.len(),
            step_limit = ?self.config.step_limit,
            "run started"
        );
        let halt = loop {
            if self.halted() {
                break Halt::EndOfSource;
            }
            if self
                .config
                .step_limit
                .is_some_and(|limit| self.steps >= limit)
            {
                warn!(steps = self.steps, "step limit reached");
                break Halt::StepLimit;
            }
            self.step(io)?;
        };
        let report = self.report(halt);
        debug!(
            steps = report.steps,
            bytes_read = report.bytes_read,
            bytes_written = report.bytes_written,
            "run finished"
        );
        Ok(report)
    }

    fn report(&self, halt: Halt) -> RunReport {
        RunReport {
            steps: self.steps,
            bytes_read: self.bytes_read,
            bytes_written: self.bytes_written,
            halt,
        }
    }

    fn execute<H: HostIo>(
        &mut self,
        instruction: Instruction,
        io: &mut H,
    ) -> Result<(), VmError> {
        use Instruction::*;

        match instruction {
            Increment => self.a = self.a.wrapping_add(1),
            Decrement => self.a = self.a.wrapping_sub(1),
            Zero => self.a = 0,
            Weave => self.a = weave(self.a),

            JumpBackward => self.jump(Direction::Backward),
            JumpForward => self.jump(Direction::Forward),
            ToggleMarker => self.marker = self.marker.toggled(),

            InsertWheelCell => self.wheel.insert_cell(),
            DeleteWheelCell => {
                self.wheel.delete_cell();
            }
            WheelForward => self.wheel.rotate_forward(),
            WheelBackward => self.wheel.rotate_backward(),
            LoadWheel => self.a = self.wheel.current(),
            StoreWheel => self.wheel.set_current(self.a),
            SwapWheel => self.a = self.wheel.exchange_current(self.a),

            PentalForward => self.pental.rotate_forward(),
            PentalBackward => self.pental.rotate_backward(),
            LoadPental => self.a = self.pental.current(),
            StorePental => self.pental.set_current(self.a),
            SwapPental => self.a = self.pental.exchange_current(self.a),

            SwapPools => {
                std::mem::swap(&mut self.source, &mut self.wheel);
                debug!(
                    source_len = self.source.len(),
                    wheel_len = self.wheel.len(),
                    "pools swapped"
                );
            }

            Read => self.read(io)?,
            Write => {
                let offset = self.source.cursor();
                io.write_byte(self.a)
                    .map_err(|source| VmError::Output { offset, source })?;
                self.bytes_written += 1;
            }

            SkipIfZero => {
                if self.a == 0 {
                    self.source.advance();
                }
            }
            SkipIfNonZero => {
                if self.a != 0 {
                    self.source.advance();
                }
            }
        }
        Ok(())
    }

    fn jump(&mut self, direction: Direction) {
        let from = self.source.cursor();
        let to = marker::seek(self.source.cells(), from, direction, self.marker.marker());
        trace!(from, to, ?direction, marker = ?self.marker, "jump");
        self.source.set_cursor(to);
    }

    fn read<H: HostIo>(&mut self, io: &mut H) -> Result<(), VmError> {
        let offset = self.source.cursor();
        match io
            .read_byte()
            .map_err(|source| VmError::Input { offset, source })?
        {
            Some(byte) => {
                self.a = byte;
                self.bytes_read += 1;
            }
            None => match self.config.eof {
                EofPolicy::Sentinel(byte) => self.a = byte,
                EofPolicy::Unchanged => {}
            },
        }
        Ok(())
    }
}
