//! Truncation detection core.
//!
//! Text rendered with a line limit does not say whether anything was cut
//! off. The probe answers that by comparing two renders of the same text:
//!
//! - the **visible pass**, rendered with the line limit, which reports how
//!   many lines were shown and how wide the widest one was;
//! - the **shadow pass**, rendered off-screen with no line limit at exactly
//!   that width, which reports how many lines the text really needs.
//!
//! The text is truncated when the shadow pass needs more lines than the
//! visible pass shows. If the visible pass already shows fewer lines than
//! the limit, the shadow pass is skipped.
//!
//! - [`measurement`] - content epochs and the visible measurement
//! - [`shadow`] - when to mount a shadow pass, and accepting its result
//! - [`reconcile`] - notification gating
//! - [`probe`] - the state machine tying them together

pub mod measurement;
pub mod pass;
pub mod probe;
pub mod reconcile;
pub mod shadow;

pub use measurement::{Epoch, VisibleMeasurement};
pub use pass::{Offscreen, ShadowPass, VisiblePass};
pub use probe::{ProbeOptions, ProbeState, TruncationProbe};
pub use reconcile::ReconciliationPolicy;
pub use shadow::{ShadowController, ShadowResult, ShadowTicket};
