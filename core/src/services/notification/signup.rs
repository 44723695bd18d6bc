//! Signup confirmation flow

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dispatch::{Dispatcher, Queue, TaskContext, TaskRegistry};
use crate::domain::entities::claims::TokenScope;
use crate::emailing::{EmailMessage, EmailSender, TOKEN_FIELD, TOKEN_LINK_FIELD};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserStore;
use crate::services::token::VerificationTokenService;

use super::config::NotificationConfig;
use super::email_address::ensure_valid_email;

/// Logical task name of the signup notification handler
pub const SIGNUP_TASK: &str = "signup_email";

/// Payload of one signup notification task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupTask {
    pub email: String,
}

/// Signup confirmation flow: request a notification, later complete it by
/// presenting the token it carried
pub struct SignupService {
    dispatcher: Dispatcher<SignupTask>,
    tokens: Arc<VerificationTokenService>,
}

impl SignupService {
    /// Registers the signup handler and returns the flow service.
    ///
    /// Registration is one-time per registry; constructing two signup
    /// services over one registry is a programming error and fails with a
    /// duplicate-task error.
    pub fn new<U, E>(
        registry: &TaskRegistry,
        queue: Arc<dyn Queue>,
        users: Arc<U>,
        sender: Arc<E>,
        tokens: Arc<VerificationTokenService>,
        config: Arc<NotificationConfig>,
    ) -> DomainResult<Self>
    where
        U: UserStore + 'static,
        E: EmailSender + 'static,
    {
        let handler_tokens = Arc::clone(&tokens);
        let task_name = registry.register(
            SIGNUP_TASK,
            registry.config().retry,
            move |ctx, task: SignupTask| {
                handle_signup(
                    ctx,
                    task,
                    Arc::clone(&users),
                    Arc::clone(&sender),
                    Arc::clone(&handler_tokens),
                    Arc::clone(&config),
                )
            },
        )?;
        let dispatcher = Dispatcher::new(queue, task_name, registry.config().dedup_window);

        Ok(Self { dispatcher, tokens })
    }

    /// Request phase: enqueue a signup notification for `email`.
    ///
    /// Returns once queue admission succeeds; the email itself is sent later
    /// by a worker. Repeated requests for the same address within the dedup
    /// window collapse into one notification.
    pub async fn request(&self, email: &str) -> DomainResult<()> {
        ensure_valid_email(email)?;
        self.dispatcher
            .dispatch(&SignupTask {
                email: email.to_string(),
            })
            .await
    }

    /// Complete phase: validate a presented signup token.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The verified email address
    /// * `Err(TokenError::InvalidOrExpired)` - The uniform rejection for any
    ///   bad token
    pub fn complete(&self, token: &str) -> DomainResult<String> {
        let claims = self.tokens.validate(token, TokenScope::Signup)?;
        Ok(claims.sub)
    }
}

async fn handle_signup<U: UserStore, E: EmailSender>(
    ctx: TaskContext,
    task: SignupTask,
    users: Arc<U>,
    sender: Arc<E>,
    tokens: Arc<VerificationTokenService>,
    config: Arc<NotificationConfig>,
) -> DomainResult<()> {
    // An existing account gets a notice instead of a signup token: the
    // rightful owner learns about the attempt, while the requester cannot
    // use signup to probe which addresses are registered.
    if let Some(account) = users.find_by_email(&task.email).await? {
        tracing::info!(
            email = %task.email,
            reserved_count = ctx.reserved_count,
            event = "already_registered",
            "email already registered, sending notice of such"
        );
        let message = EmailMessage::templated(
            &config.templates.already_registered,
            &account.email,
            &config.from_address,
        )
        .with_field("email", task.email.clone());
        sender.send(&message).await.map_err(|e| {
            DomainError::EmailTransport {
                message: format!(
                    "could not send already-registered notice to {}: {e}",
                    task.email
                ),
            }
        })?;
        return Ok(());
    }

    tracing::info!(
        email = %task.email,
        reserved_count = ctx.reserved_count,
        event = "signup_token_minted",
        "generating signup email"
    );
    let token = tokens.mint(TokenScope::Signup, &task.email, None)?;

    let message = EmailMessage::templated(
        &config.templates.signup,
        &task.email,
        &config.from_address,
    )
    .with_field(TOKEN_FIELD, token.clone())
    .with_field(TOKEN_LINK_FIELD, config.complete_signup_url(&token));
    sender.send(&message).await.map_err(|e| {
        DomainError::EmailTransport {
            message: format!("could not send signup email to {}: {e}", task.email),
        }
    })?;

    tracing::info!(email = %task.email, "signup email sent");
    Ok(())
}
