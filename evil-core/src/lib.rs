//! # evil-core
//!
//! A virtual machine for the evil esoteric language. Programs are executed
//! straight from their source bytes: every byte is fetched, dispatched and
//! stepped over in one go, with no parse phase.
//!
//! ## Machine model
//!
//! - **A**: one byte register, the only arithmetic register.
//! - **Source pool**: the program bytes plus the source pointer.
//! - **Wheel pool**: a circular scratch pool that starts as one zero cell and
//!   grows or shrinks one cell at a time.
//! - **Pental pool**: five circular cells.
//! - **Marker state**: selects `m` or `j` as the target of the jump instructions.
//!
//! The swap instruction exchanges the source and wheel pools, so a program can
//! build code on the wheel and then run it.
//!
//! ## Example
//!
//! ```rust
//! use evil_core::{Machine, ScriptedIo, VmConfig};
//!
//! let mut program = vec![b'a'; 65];
//! program.push(b'w');
//!
//! let mut machine = Machine::new(program, VmConfig::default());
//! let mut io = ScriptedIo::default();
//! machine.run(&mut io).unwrap();
//! assert_eq!(io.output(), b"A");
//! ```
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod io;
pub mod isa;
pub mod machine;
pub mod marker;
pub mod pools;
pub mod weave;

pub use config::{EofPolicy, VmConfig, DEFAULT_EOF_BYTE};
pub use error::VmError;
pub use io::{HostIo, ScriptedIo, StdIo};
pub use isa::{Instruction, MARKER_ALTERNATE, MARKER_NORMAL};
pub use machine::{Halt, Machine, RunReport, Snapshot};
pub use marker::{Direction, MarkerState};
pub use pools::{Pental, Pool, PENTAL_SIZE};
pub use weave::{unweave, weave};

/// Run `program` to completion against `io` with the given configuration.
pub fn run<H: HostIo>(
    program: impl Into<Vec<u8>>,
    config: VmConfig,
    io: &mut H,
) -> Result<RunReport, VmError> {
    Machine::new(program, config).run(io)
}
