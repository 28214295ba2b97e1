//! Host-facing hash module interface
//!
//! A cracking host drives every hash type through the same small set of entry
//! points: parse a hash line, print a digest, post-process a cracked
//! candidate, and report the self-test vector and length bounds.
//! [`HashModule`] is that interface; [`TripcodeModule`] implements it for
//! Secretlounge-ng tripcodes.
//!
//! The static tuning a host needs to schedule the kernel (kernel type, digest
//! layout, loop counts) is not part of the trait. It is available from
//! [`TripcodeModule::info`] as a serializable [`ModuleInfo`].

use std::str::FromStr;

use serde::de::value::{Error as NameError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::tripcode::{
    self, Digest, EncodedHash, SaltBounds, SelfTest, DIGEST_WORDS, MAX_PLAINTEXT_LENGTH,
};

/// Entry points a host engine calls on a hash module.
pub trait HashModule {
    type Digest;

    /// Parse one hash line.
    fn decode(&self, line: &str) -> Result<Self::Digest, ParseError>;

    /// Print a digest in the module's canonical text form.
    fn encode(&self, digest: &Self::Digest) -> EncodedHash;

    /// Rewrite a cracked candidate before it is reported.
    fn normalize_plaintext(&self, plain: &[u8]) -> Vec<u8>;

    /// Known-good pair the host checks before trusting the module.
    fn self_test(&self) -> SelfTest;

    fn max_plaintext_length(&self) -> usize;

    fn salt_bounds(&self) -> SaltBounds;
}

/// Where the hash loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackExec {
    InsideKernel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashCategory {
    Generic,
}

/// How the salt reaches the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltType {
    /// Carried in the hash line itself.
    Embedded,
}

/// Kernel optimizations the module is compatible with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimization {
    ZeroByte,
}

/// Host options the module requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleOption {
    StockModule,
    /// Candidates are laid out little-endian in the kernel buffers.
    PtGenerateLe,
    /// Kernel is selected by type alone.
    TmKernel,
}

/// Inner kernel loop iteration bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KernelLoops {
    pub min: u32,
    pub max: u32,
}

/// Static description of a hash module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub hash_name: &'static str,
    pub kern_type: u64,
    pub attack_exec: AttackExec,
    pub hash_category: HashCategory,
    /// Digest size in bytes.
    pub digest_size: usize,
    pub digest_positions: [usize; DIGEST_WORDS],
    pub opti_type: &'static [Optimization],
    pub opts_type: &'static [ModuleOption],
    pub salt_type: SaltType,
    pub salt_bounds: SaltBounds,
    pub plaintext_max: usize,
    pub kernel_loops: KernelLoops,
    pub jit_build_options: Option<&'static str>,
    pub jit_cache_disable: bool,
    pub self_test: SelfTest,
}

/// Vendor of the compute platform a device belongs to.
///
/// Host input: the variants mirror the platform vendors a host reports, not
/// values this module emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformVendor {
    Amd,
    Apple,
    Intel,
    Nvidia,
    Pocl,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Cpu,
    Gpu,
    Accelerator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub platform_vendor: PlatformVendor,
    pub device_type: DeviceType,
}

fn from_name<'de, T: Deserialize<'de>>(name: &'de str) -> Result<T, NameError> {
    let de: StrDeserializer<'de, NameError> = name.into_deserializer();
    T::deserialize(de)
}

/// Parses the snake_case name, e.g. `"apple"`.
impl FromStr for PlatformVendor {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_name(s)
    }
}

/// Parses the snake_case name, e.g. `"cpu"`.
impl FromStr for DeviceType {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_name(s)
    }
}

pub const KERN_TYPE: u64 = 24000;
pub const KERNEL_LOOPS: u32 = 1024;

/// The Secretlounge-ng tripcode module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripcodeModule;

impl TripcodeModule {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            hash_name: "Secretlounge-ng Tripcode",
            kern_type: KERN_TYPE,
            attack_exec: AttackExec::InsideKernel,
            hash_category: HashCategory::Generic,
            digest_size: DIGEST_WORDS * 4,
            digest_positions: [0, 1, 2, 3],
            opti_type: &[Optimization::ZeroByte],
            opts_type: &[
                ModuleOption::StockModule,
                ModuleOption::PtGenerateLe,
                ModuleOption::TmKernel,
            ],
            salt_type: SaltType::Embedded,
            salt_bounds: tripcode::SALT_BOUNDS,
            plaintext_max: MAX_PLAINTEXT_LENGTH,
            kernel_loops: KernelLoops {
                min: KERNEL_LOOPS,
                max: KERNEL_LOOPS,
            },
            jit_build_options: None,
            jit_cache_disable: false,
            self_test: tripcode::SELF_TEST,
        }
    }

    /// Whether the host should warn that this module is unreliable on
    /// `device`. Only Apple's OpenCL CPU devices are flagged.
    ///
    /// The stock module table leaves this slot at its default, so hosts only
    /// see the flag if they call this directly.
    pub fn unstable_warning(&self, device: &DeviceInfo) -> bool {
        let unstable = device.platform_vendor == PlatformVendor::Apple
            && device.device_type == DeviceType::Cpu;
        if unstable {
            tracing::debug!(?device, "tripcode kernel flagged unstable");
        }
        unstable
    }
}

impl HashModule for TripcodeModule {
    type Digest = Digest;

    fn decode(&self, line: &str) -> Result<Digest, ParseError> {
        tripcode::decode(line)
    }

    fn encode(&self, digest: &Digest) -> EncodedHash {
        tripcode::encode(digest)
    }

    fn normalize_plaintext(&self, plain: &[u8]) -> Vec<u8> {
        tripcode::normalize_plaintext(plain)
    }

    fn self_test(&self) -> SelfTest {
        tripcode::SELF_TEST
    }

    fn max_plaintext_length(&self) -> usize {
        MAX_PLAINTEXT_LENGTH
    }

    fn salt_bounds(&self) -> SaltBounds {
        tripcode::SALT_BOUNDS
    }
}
