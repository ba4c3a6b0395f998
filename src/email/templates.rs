use crate::ports::EmailMessage;

pub const RESET_PASSWORD_SUBJECT: &str = "Reset Password at IACP";
pub const DONATION_SUBJECT: &str = "Thank you for your donation to IACP";

pub fn reset_password(recipient: &str) -> EmailMessage {
    let html_body = format!(
        "\n<h4>Hi,</h4>\n\n<p>\nThis is a confirmation that the password for your account {} has just been changed.\n\n</p>",
        recipient
    );

    EmailMessage {
        to: recipient.to_string(),
        subject: RESET_PASSWORD_SUBJECT.to_string(),
        html_body,
    }
}

pub fn donation_receipt(recipient: &str, amount: i32) -> EmailMessage {
    let html_body = format!(
        "\n<h4>Hi,</h4>\n\n<p>\nThank you for your donation of ${} to the IA-CP Organization.\nThis email is your receipt.\n</p>",
        amount
    );

    EmailMessage {
        to: recipient.to_string(),
        subject: DONATION_SUBJECT.to_string(),
        html_body,
    }
}
