// src/errors.rs
//! Error handling for the ECDSA core with severity classification and contextual
//! logging for auditing. Verification outcomes are plain values (see
//! `protocols::ecdsa::VerificationOutcome`); this module covers genuine faults.

use log::{error, info, warn};
use std::fmt;
use thiserror::Error;

use crate::params::ParamsError;

/// Security severity levels for error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecuritySeverity {
    /// Violation that compromises key material or signature soundness
    Critical,
    /// Violation that affects security properties of a single operation
    High,
    /// Affects functionality but not core security
    Medium,
    /// Affects usability only
    Low,
}

impl fmt::Display for SecuritySeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SecuritySeverity::Critical => write!(f, "CRITICAL"),
            SecuritySeverity::High => write!(f, "HIGH"),
            SecuritySeverity::Medium => write!(f, "MEDIUM"),
            SecuritySeverity::Low => write!(f, "LOW"),
        }
    }
}

/// Error types for curve arithmetic and the signature protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcdsaError {
    /// Division by a value that has no inverse modulo the given modulus
    #[error("No modular inverse in operation '{operation}' ({modulus_bits}-bit modulus)")]
    NoInverse {
        operation: String,
        modulus_bits: u32,
    },

    /// The derived nonce, or the resulting s, is zero modulo the group order
    #[error("Degenerate nonce: signing must be retried with a fresh nonce")]
    DegenerateNonce,

    #[error("Invalid private key: {reason}")]
    InvalidPrivateKey { reason: String },

    #[error("Invalid length: expected {expected} bytes, got {actual} in context '{context}'")]
    InvalidLength {
        expected: usize,
        actual: usize,
        context: String,
    },

    #[error("Invalid point in context '{context}'")]
    InvalidPoint { context: String },

    /// Scalar is negative or wider than the fixed multiplication width
    #[error("Scalar of {bits} bits outside the {max_bits}-bit multiplication width")]
    ScalarOutOfRange { bits: u32, max_bits: u32 },

    #[error("Entropy source unavailable: {reason}")]
    EntropyUnavailable { reason: String },

    #[error("Invalid curve parameters: {0}")]
    InvalidParameters(#[from] ParamsError),
}

impl EcdsaError {
    /// Get the security severity level of this error
    pub fn severity(&self) -> SecuritySeverity {
        match self {
            EcdsaError::InvalidPrivateKey { .. } => SecuritySeverity::Critical,
            EcdsaError::EntropyUnavailable { .. } => SecuritySeverity::Critical,
            EcdsaError::DegenerateNonce => SecuritySeverity::High,
            EcdsaError::InvalidPoint { .. } => SecuritySeverity::High,
            EcdsaError::InvalidParameters(_) => SecuritySeverity::High,
            EcdsaError::NoInverse { .. } => SecuritySeverity::Medium,
            EcdsaError::ScalarOutOfRange { .. } => SecuritySeverity::Low,
            EcdsaError::InvalidLength { .. } => SecuritySeverity::Low,
        }
    }

    /// Convert error to a user-safe message (no sensitive details)
    pub fn to_user_message(&self) -> String {
        match self.severity() {
            SecuritySeverity::Critical | SecuritySeverity::High => {
                "Cryptographic operation rejected".to_string()
            }
            SecuritySeverity::Medium => "Arithmetic failure during signature operation".to_string(),
            SecuritySeverity::Low => format!("Error: {}", self),
        }
    }

    /// Get detailed log message for security auditing
    pub fn to_audit_log(&self) -> String {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let process_id = std::process::id();
        let thread_id = format!("{:?}", std::thread::current().id());

        format!(
            "[{}] [PID: {}] [TID: {}] [SEVERITY: {}] {}",
            timestamp,
            process_id,
            thread_id,
            self.severity(),
            self
        )
    }

    /// Log the error with call-site context at a level matching its severity
    pub fn log_with_context(&self, module: &str, function: &str, line: u32) {
        let log_message = format!("[{}:{}:{}] {}", module, function, line, self.to_audit_log());

        match self.severity() {
            SecuritySeverity::Critical | SecuritySeverity::High => error!("{}", log_message),
            SecuritySeverity::Medium => warn!("{}", log_message),
            SecuritySeverity::Low => info!("{}", log_message),
        }
    }
}

/// Extension trait for logging failed results without consuming them
pub trait ResultExt<T> {
    fn log_on_error(self, module: &str, function: &str, line: u32) -> Self;
}

impl<T> ResultExt<T> for Result<T, EcdsaError> {
    fn log_on_error(self, module: &str, function: &str, line: u32) -> Self {
        if let Err(ref error) = self {
            error.log_with_context(module, function, line);
        }
        self
    }
}
