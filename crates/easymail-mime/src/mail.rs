//! Outbound mail message model.

use crate::attachment::Attachment;
use crate::builder::MessageBuilder;
use crate::error::{Error, Result};
use crate::header::Headers;
use std::path::Path;

/// File extensions accepted by [`Mail::set_html_file`].
const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// One outbound email.
///
/// Recipients keep insertion order and are never deduplicated. Headers and
/// attachments behave like ordered maps: re-adding a name replaces the
/// earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mail {
    from: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    subject: String,
    body: String,
    is_html: bool,
    headers: Headers,
    attachments: Vec<Attachment>,
}

impl Mail {
    /// Creates a new mail with its required fields.
    #[must_use]
    pub fn new<I, S>(
        from: impl Into<String>,
        to: I,
        subject: impl Into<String>,
        body: impl Into<String>,
        is_html: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            body: body.into(),
            is_html,
            headers: Headers::new(),
            attachments: Vec::new(),
        }
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the `To` recipients.
    #[must_use]
    pub fn to(&self) -> &[String] {
        &self.to
    }

    /// Returns the `Cc` recipients.
    #[must_use]
    pub fn cc(&self) -> &[String] {
        &self.cc
    }

    /// Returns the `Bcc` recipients.
    #[must_use]
    pub fn bcc(&self) -> &[String] {
        &self.bcc
    }

    /// Returns every envelope recipient: `To`, then `Cc`, then `Bcc`.
    #[must_use]
    pub fn recipients(&self) -> Vec<&str> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.bcc)
            .map(String::as_str)
            .collect()
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true if the body is HTML.
    #[must_use]
    pub const fn is_html(&self) -> bool {
        self.is_html
    }

    /// Returns the custom headers.
    ///
    /// Reserved structural names may appear here but are never serialized.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns true if at least one attachment is present.
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Sets the subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Replaces the body with HTML.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.body = html.into();
        self.is_html = true;
    }

    /// Replaces the body with plain text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.body = text.into();
        self.is_html = false;
    }

    /// Loads an HTML file and uses it as the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`] unless the path ends in `.html` or
    /// `.htm`, [`Error::Io`] if the file cannot be read and
    /// [`Error::InvalidUtf8`] if it is not UTF-8. The mail is unchanged on
    /// error.
    pub fn set_html_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let has_html_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !has_html_extension {
            return Err(Error::InvalidExtension {
                path: path.to_path_buf(),
                expected: ".html or .htm",
            });
        }

        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        self.set_html(html);
        Ok(())
    }

    /// Sets a custom header, replacing any earlier value for the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Appends a `To` recipient.
    pub fn add_to(&mut self, to: impl Into<String>) {
        self.to.push(to.into());
    }

    /// Appends a `Cc` recipient.
    pub fn add_cc(&mut self, cc: impl Into<String>) {
        self.cc.push(cc.into());
    }

    /// Appends a `Bcc` recipient.
    pub fn add_bcc(&mut self, bcc: impl Into<String>) {
        self.bcc.push(bcc.into());
    }

    /// Appends several `To` recipients.
    pub fn add_to_all<I, S>(&mut self, to: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(to.into_iter().map(Into::into));
    }

    /// Appends several `Cc` recipients.
    pub fn add_cc_all<I, S>(&mut self, cc: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc.extend(cc.into_iter().map(Into::into));
    }

    /// Appends several `Bcc` recipients.
    pub fn add_bcc_all<I, S>(&mut self, bcc: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc.extend(bcc.into_iter().map(Into::into));
    }

    /// Adds an attachment. An existing attachment with the same file name is
    /// replaced in place.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        if let Some(existing) = self
            .attachments
            .iter_mut()
            .find(|a| a.filename == attachment.filename)
        {
            existing.content = attachment.content;
        } else {
            self.attachments.push(attachment);
        }
    }

    /// Loads a file from disk and attaches it under its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded. The mail is unchanged
    /// on error.
    pub fn attach_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let attachment = Attachment::from_file(path)?;
        self.add_attachment(attachment);
        Ok(())
    }

    /// Loads several files and attaches them.
    ///
    /// Every file is loaded before any is attached, so a failure leaves the
    /// attachment set untouched.
    ///
    /// # Errors
    ///
    /// Returns the first load error.
    pub fn attach_files<I, P>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let loaded = paths
            .into_iter()
            .map(Attachment::from_file)
            .collect::<Result<Vec<_>>>()?;

        for attachment in loaded {
            self.add_attachment(attachment);
        }
        Ok(())
    }

    /// Returns a serializer for this mail.
    #[must_use]
    pub const fn builder(&self) -> MessageBuilder<'_> {
        MessageBuilder::new(self)
    }

    /// Serializes the mail with a freshly generated boundary.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.builder().build()
    }
}
