use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 32-bit status code as reported by the native device. Negative values are failures.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ResultCode(pub i32);

impl ResultCode {
    pub const OK: ResultCode = ResultCode(0);
    pub const FAIL: ResultCode = ResultCode(0x8000_4005_u32 as i32);
    pub const INVALID_ARG: ResultCode = ResultCode(0x8007_0057_u32 as i32);
    pub const OUT_OF_MEMORY: ResultCode = ResultCode(0x8007_000E_u32 as i32);
    pub const UNSUPPORTED: ResultCode = ResultCode(0x887A_0004_u32 as i32);

    #[inline(always)]
    pub const fn is_success(&self) -> bool {
        self.0 >= 0
    }

    #[inline(always)]
    pub const fn is_failure(&self) -> bool {
        self.0 < 0
    }

    /// Converts the code into a `Result`, wrapping failures with the kind of object that was
    /// being created.
    #[inline]
    pub fn check(self, object: StateObjectKind) -> Result<(), DeviceCreationError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(DeviceCreationError { object, code: self })
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateObjectKind {
    Rasterizer,
    Blend,
    DepthStencil,
    Sampler,
}

impl fmt::Display for StateObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateObjectKind::Rasterizer => "rasterizer",
            StateObjectKind::Blend => "blend",
            StateObjectKind::DepthStencil => "depth/stencil",
            StateObjectKind::Sampler => "sampler",
        };
        f.write_str(name)
    }
}

/// The device refused to create a state object. `code` is the native result code, unchanged.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("unable to create {object} state: device returned {code}")]
pub struct DeviceCreationError {
    pub object: StateObjectKind,
    pub code: ResultCode,
}
