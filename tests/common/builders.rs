//! Test builders — ergonomic constructors for log4j event markup.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

/// Fluent builder for `<log4j:event>` markup.
///
/// # Example
///
/// ```rust
/// let xml = EventXml::new()
///     .logger("App.Worker")
///     .level("ERROR")
///     .message("Boom")
///     .property("host", "srv1")
///     .build();
/// ```
#[derive(Default)]
pub struct EventXml {
    logger: Option<String>,
    level: Option<String>,
    thread: Option<String>,
    timestamp: Option<String>,
    message: Option<String>,
    throwable: Option<String>,
    properties: Vec<(String, String)>,
}

impl EventXml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = Some(thread.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl ToString) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn throwable(mut self, throwable: impl Into<String>) -> Self {
        self.throwable = Some(throwable.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> String {
        let mut xml = String::from("<log4j:event");
        for (attr, value) in [
            ("logger", &self.logger),
            ("level", &self.level),
            ("thread", &self.thread),
            ("timestamp", &self.timestamp),
        ] {
            if let Some(value) = value {
                xml.push_str(&format!(" {attr}=\"{}\"", escape(value)));
            }
        }
        xml.push('>');

        if let Some(message) = &self.message {
            xml.push_str(&format!("<log4j:message>{}</log4j:message>", escape(message)));
        }
        if let Some(throwable) = &self.throwable {
            xml.push_str(&format!("<log4j:throwable>{}</log4j:throwable>", escape(throwable)));
        }
        if !self.properties.is_empty() {
            xml.push_str("<log4j:properties>");
            for (name, value) in &self.properties {
                xml.push_str(&format!(
                    "<log4j:data name=\"{}\" value=\"{}\"/>",
                    escape(name),
                    escape(value)
                ));
            }
            xml.push_str("</log4j:properties>");
        }

        xml.push_str("</log4j:event>");
        xml
    }
}

/// Escape the five XML special characters.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
