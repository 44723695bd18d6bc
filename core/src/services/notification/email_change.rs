//! Authenticated email-change verification flow

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dispatch::{Dispatcher, Queue, TaskContext, TaskRegistry};
use crate::domain::entities::claims::TokenScope;
use crate::emailing::{EmailMessage, EmailSender, TOKEN_FIELD, TOKEN_LINK_FIELD};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::UserStore;
use crate::services::token::VerificationTokenService;

use super::config::NotificationConfig;
use super::email_address::ensure_valid_email;

/// Logical task name of the email-change notification handler
pub const EMAIL_CHANGE_TASK: &str = "verify_email";

/// Payload of one email-change notification task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailChangeTask {
    pub account_id: i64,
    pub email: String,
}

/// Email-change verification flow.
///
/// The minted token binds the new address to the requesting account, so it
/// cannot be replayed to move a different account's email.
pub struct EmailChangeService {
    dispatcher: Dispatcher<EmailChangeTask>,
    tokens: Arc<VerificationTokenService>,
}

impl EmailChangeService {
    /// Registers the email-change handler and returns the flow service
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
            EMAIL_CHANGE_TASK,
            registry.config().retry,
            move |ctx, task: EmailChangeTask| {
                handle_email_change(
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

    /// Request phase: enqueue a verification notification binding
    /// `new_email` to `account_id`
    pub async fn request(&self, account_id: i64, new_email: &str) -> DomainResult<()> {
        ensure_valid_email(new_email)?;
        self.dispatcher
            .dispatch(&EmailChangeTask {
                account_id,
                email: new_email.to_string(),
            })
            .await
    }

    /// Complete phase: validate a presented email-change token.
    ///
    /// # Returns
    ///
    /// * `Ok((account_id, email))` - The bound account and the verified new
    ///   address
    /// * `Err(TokenError::InvalidOrExpired)` - The uniform rejection for any
    ///   bad token
    pub fn complete(&self, token: &str) -> DomainResult<(i64, String)> {
        let claims = self.tokens.validate(token, TokenScope::EmailChange)?;
        // Scope guarantees this was minted here, which always binds an
        // account; a missing id still gets the uniform rejection.
        let account_id = claims
            .account_id
            .ok_or(DomainError::Token(TokenError::InvalidOrExpired))?;
        Ok((account_id, claims.sub))
    }
}

async fn handle_email_change<U: UserStore, E: EmailSender>(
    ctx: TaskContext,
    task: EmailChangeTask,
    users: Arc<U>,
    sender: Arc<E>,
    tokens: Arc<VerificationTokenService>,
    config: Arc<NotificationConfig>,
) -> DomainResult<()> {
    tracing::info!(
        account_id = task.account_id,
        reserved_count = ctx.reserved_count,
        "generating verify email"
    );

    let account = users
        .find_by_account_id(task.account_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            resource: format!("account with id {}", task.account_id),
        })?;

    let token = tokens.mint(TokenScope::EmailChange, &task.email, Some(task.account_id))?;

    // The notification goes to the account's stored address; the token
    // subject is the new address being verified.
    let message = EmailMessage::templated(
        &config.templates.email_change,
        &account.email,
        &config.from_address,
    )
    .with_field(TOKEN_FIELD, token.clone())
    .with_field(TOKEN_LINK_FIELD, config.verify_email_url(&token));
    sender.send(&message).await.map_err(|e| {
        DomainError::EmailTransport {
            message: format!("could not send verify email to {}: {e}", account.email),
        }
    })?;

    tracing::info!(account_id = task.account_id, "verify email sent");
    Ok(())
}
