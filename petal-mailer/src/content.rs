//! Fixed message content for the account email flows
//!
//! Subjects and bodies are composed with plain string templates. The
//! wording is owned by this crate; callers only supply the dynamic parts.

use crate::message::Email;

/// Welcome message for a newly registered account.
pub(crate) fn welcome(username: &str) -> Email {
    let html = format!(
        "<h1>Welcome, {username}!</h1>\
         <p>Your Petal account has been created and is ready to use.</p>\
         <p>We are glad to have you with us.</p>"
    );
    let text = format!(
        "Welcome, {username}!\n\n\
         Your Petal account has been created and is ready to use.\n\n\
         We are glad to have you with us.\n"
    );

    Email::new()
        .subject(&format!("Welcome to Petal, {username}!"))
        .html(&html)
        .text(&text)
}

/// Password reset message carrying the reset token.
///
/// The token appears only in the message bodies; it never goes anywhere
/// else.
pub(crate) fn password_reset(reset_token: &str, username: &str) -> Email {
    let html = format!(
        "<p>Hi {username},</p>\
         <p>We received a request to reset your password. Use the code below \
         to choose a new one:</p>\
         <p><code>{reset_token}</code></p>\
         <p>If you did not request a reset, you can safely ignore this \
         email.</p>"
    );
    let text = format!(
        "Hi {username},\n\n\
         We received a request to reset your password. Use the code below to \
         choose a new one:\n\n\
         {reset_token}\n\n\
         If you did not request a reset, you can safely ignore this email.\n"
    );

    Email::new()
        .subject("Reset your Petal password")
        .html(&html)
        .text(&text)
}
