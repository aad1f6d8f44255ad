//! # Auth Flow
//!
//! The authentication slice of state and its step machine.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Login  ── CreateAccount ──────────► Signup                           │
//! │   Signup ── AlreadyHaveAccount ─────► Login                            │
//! │   Login  ── ForgotPassword ─────────► Forgot                           │
//! │   Forgot ── BackToLogin ────────────► Login                            │
//! │   Forgot ── SendOtp ────────────────► Otp                              │
//! │   Otp    ── VerifyOtp ──────────────► Reset                            │
//! │   Reset  ── UpdatePassword ─────────► Login                            │
//! │                                                                         │
//! │  Initial: Login. No terminal step. Every edge is a user action.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mocked Verification
//! `SendOtp`, `VerifyOtp` and `UpdatePassword` move on unconditionally. No
//! code is sent, no OTP or password is checked. The field values are only
//! stored so the view can echo them (e.g. "We sent a code to {email}").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Auth Step
// =============================================================================

/// Which auth sub-view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuthStep {
    #[default]
    Login,
    Signup,
    Forgot,
    Otp,
    Reset,
}

impl AuthStep {
    /// The transition table.
    ///
    /// Returns `None` when `trigger` is not an outgoing edge of this step.
    pub fn next(self, trigger: AuthTrigger) -> Option<AuthStep> {
        use AuthStep::*;
        use AuthTrigger::*;

        match (self, trigger) {
            (Login, CreateAccount) => Some(Signup),
            (Login, ForgotPassword) => Some(Forgot),
            (Signup, AlreadyHaveAccount) => Some(Login),
            (Forgot, SendOtp) => Some(Otp),
            (Forgot, BackToLogin) => Some(Login),
            (Otp, VerifyOtp) => Some(Reset),
            (Reset, UpdatePassword) => Some(Login),
            _ => None,
        }
    }

    /// Outgoing edges, in the order the view lays out their buttons.
    pub fn available_triggers(self) -> &'static [AuthTrigger] {
        match self {
            AuthStep::Login => &[AuthTrigger::CreateAccount, AuthTrigger::ForgotPassword],
            AuthStep::Signup => &[AuthTrigger::AlreadyHaveAccount],
            AuthStep::Forgot => &[AuthTrigger::SendOtp, AuthTrigger::BackToLogin],
            AuthStep::Otp => &[AuthTrigger::VerifyOtp],
            AuthStep::Reset => &[AuthTrigger::UpdatePassword],
        }
    }

    /// Fields whose inputs are shown on this step.
    pub fn editable_fields(self) -> &'static [AuthField] {
        match self {
            AuthStep::Login | AuthStep::Signup | AuthStep::Forgot => &[AuthField::Email],
            AuthStep::Otp => &[AuthField::Otp],
            AuthStep::Reset => &[AuthField::NewPassword],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthStep::Login => "Login",
            AuthStep::Signup => "Sign Up",
            AuthStep::Forgot => "Reset Password",
            AuthStep::Otp => "Enter OTP",
            AuthStep::Reset => "New Password",
        }
    }
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthStep::Login => "login",
            AuthStep::Signup => "signup",
            AuthStep::Forgot => "forgot",
            AuthStep::Otp => "otp",
            AuthStep::Reset => "reset",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Auth Trigger
// =============================================================================

/// A user action that moves the auth flow to another step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuthTrigger {
    /// "Create an account"
    CreateAccount,
    /// "Forgot password?"
    ForgotPassword,
    /// "Already have an account? Login"
    AlreadyHaveAccount,
    /// "SEND OTP"
    SendOtp,
    /// "Back to login"
    BackToLogin,
    /// "VERIFY OTP"
    VerifyOtp,
    /// "UPDATE PASSWORD"
    UpdatePassword,
}

impl AuthTrigger {
    pub const ALL: [AuthTrigger; 7] = [
        AuthTrigger::CreateAccount,
        AuthTrigger::ForgotPassword,
        AuthTrigger::AlreadyHaveAccount,
        AuthTrigger::SendOtp,
        AuthTrigger::BackToLogin,
        AuthTrigger::VerifyOtp,
        AuthTrigger::UpdatePassword,
    ];

    /// Kebab-case name, used by the shell's `auth <trigger>` command.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthTrigger::CreateAccount => "create-account",
            AuthTrigger::ForgotPassword => "forgot-password",
            AuthTrigger::AlreadyHaveAccount => "already-have-account",
            AuthTrigger::SendOtp => "send-otp",
            AuthTrigger::BackToLogin => "back-to-login",
            AuthTrigger::VerifyOtp => "verify-otp",
            AuthTrigger::UpdatePassword => "update-password",
        }
    }

    /// The label the view shows for this trigger.
    pub fn label(&self) -> &'static str {
        match self {
            AuthTrigger::CreateAccount => "Create an account",
            AuthTrigger::ForgotPassword => "Forgot password?",
            AuthTrigger::AlreadyHaveAccount => "Already have an account? Login",
            AuthTrigger::SendOtp => "SEND OTP",
            AuthTrigger::BackToLogin => "Back to login",
            AuthTrigger::VerifyOtp => "VERIFY OTP",
            AuthTrigger::UpdatePassword => "UPDATE PASSWORD",
        }
    }
}

impl fmt::Display for AuthTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthTrigger {
    type Err = CoreError;

    /// Accepts kebab-case, snake_case or space separated names, any case
    /// (`send-otp`, `send_otp`, `Send OTP`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c.to_ascii_lowercase() })
            .collect();

        AuthTrigger::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownTrigger(s.trim().to_string()))
    }
}

// =============================================================================
// Auth Field
// =============================================================================

/// A text input of the auth forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AuthField {
    Email,
    Otp,
    NewPassword,
}

impl fmt::Display for AuthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthField::Email => "email",
            AuthField::Otp => "otp",
            AuthField::NewPassword => "newPassword",
        };
        f.write_str(name)
    }
}

impl FromStr for AuthField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(AuthField::Email),
            "otp" => Ok(AuthField::Otp),
            "newpassword" | "new_password" | "new-password" | "password" => {
                Ok(AuthField::NewPassword)
            }
            other => Err(CoreError::UnknownAuthField(other.to_string())),
        }
    }
}

// =============================================================================
// Auth State
// =============================================================================

/// The auth slice of application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub step: AuthStep,
}

impl AuthState {
    /// Applies `trigger` to the current step.
    ///
    /// Returns the new step, or `None` (state untouched) if the trigger is
    /// not an edge out of the current step. Field contents are never
    /// consulted.
    pub fn advance(&mut self, trigger: AuthTrigger) -> Option<AuthStep> {
        let from = self.step;
        let Some(to) = from.next(trigger) else {
            debug!(step = %from, %trigger, "auth trigger not available from this step");
            return None;
        };

        self.step = to;
        info!(from = %from, to = %to, %trigger, "auth step changed");
        Some(to)
    }

    /// Stores a form value.
    ///
    /// The value is stored whatever the current step; which inputs exist is
    /// the view's concern (see [`AuthStep::editable_fields`]).
    pub fn set_field(&mut self, field: AuthField, value: String) {
        debug!(%field, step = %self.step, "auth field set");
        match field {
            AuthField::Email => self.email = value,
            AuthField::Otp => self.otp = value,
            AuthField::NewPassword => self.new_password = value,
        }
    }

    pub fn field(&self, field: AuthField) -> &str {
        match field {
            AuthField::Email => &self.email,
            AuthField::Otp => &self.otp,
            AuthField::NewPassword => &self.new_password,
        }
    }
}
