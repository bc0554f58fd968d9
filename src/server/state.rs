//! Server application state shared across handlers

use crate::estimator::Estimator;
use crate::notifications::{deliver_all, LeadNotifier, Mailer, OutboundEmail};
use crate::scoring::{self, TierProfile};
use crate::shutdown::ShutdownState;
use std::sync::Arc;

/// Everything a handler needs, cheap to clone per request
#[derive(Clone)]
pub struct ServerAppState {
    /// Bearer token for the client-portal routes
    pub portal_token: String,

    /// Calculator bound to the served catalog
    pub estimator: Estimator,

    /// Band table for portal tier suggestions
    pub onboarding_profile: Arc<TierProfile>,

    pub notifier: Arc<LeadNotifier>,

    pub mailer: Arc<dyn Mailer>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    pub fn new(
        portal_token: String,
        estimator: Estimator,
        notifier: LeadNotifier,
        mailer: Arc<dyn Mailer>,
        shutdown_state: ShutdownState,
    ) -> Self {
        Self {
            portal_token,
            estimator,
            onboarding_profile: Arc::new(scoring::onboarding()),
            notifier: Arc::new(notifier),
            mailer,
            shutdown_state,
        }
    }

    /// Send `emails` on the blocking pool without holding up the response.
    /// Each dispatch counts as pending until done so shutdown can wait for it.
    pub fn dispatch(&self, emails: Vec<OutboundEmail>) {
        if emails.is_empty() {
            return;
        }

        let mailer = Arc::clone(&self.mailer);
        let guard = self.shutdown_state.begin_delivery();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let delivered = deliver_all(mailer.as_ref(), &emails);
            log::debug!(
                "Delivered {}/{} message(s) via {} mailer",
                delivered,
                emails.len(),
                mailer.name()
            );
        });
    }
}
