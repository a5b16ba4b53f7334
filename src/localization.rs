use anyhow::{anyhow, bail, Context, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::markup::check_html;

/// Russian message resource, embedded so the binary does not depend on its
/// working directory for texts
const RU_RESOURCE: &str = include_str!("../locales/ru/main.ftl");

/// Keys whose text is sent with HTML formatting enabled
pub const FORMATTED_KEYS: &[&str] = &[
    "greeting",
    "fallback",
    "menu-caption",
    "services-caption",
    "schedule",
    "contact-admin",
];

/// Plain-text keys (error notices and the liveness page)
pub const PLAIN_KEYS: &[&str] = &[
    "word-or",
    "error-file-missing",
    "error-files-missing",
    "error-delivery",
    "liveness",
];

/// Message catalog for the bot's user-facing texts
pub struct Catalog {
    bundle: FluentBundle<FluentResource>,
}

impl Catalog {
    /// Load the embedded Russian catalog
    pub fn load() -> Result<Self> {
        Self::from_source(RU_RESOURCE)
    }

    /// Build a catalog from Fluent source.
    ///
    /// Fails when the source does not parse, a required key is missing, or
    /// a formatted template would be rejected by Telegram's HTML parser.
    pub fn from_source(source: &str) -> Result<Self> {
        let locale: LanguageIdentifier = "ru".parse()?;
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse message resource: {errors:?}"))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add message resource: {errors:?}"))?;

        let catalog = Self { bundle };

        for key in FORMATTED_KEYS.iter().chain(PLAIN_KEYS) {
            if !catalog.bundle.has_message(key) {
                bail!("Missing translation: {key}");
            }
        }
        for key in FORMATTED_KEYS {
            check_html(&catalog.text(key))
                .with_context(|| format!("Message `{key}` is not valid Telegram HTML"))?;
        }

        Ok(catalog)
    }

    /// Get a message without arguments
    pub fn text(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Get a message with simple string arguments
    pub fn text_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.format(key, Some(&fluent_args))
    }

    /// Apology sent when static files for a response are absent
    pub fn missing_files_notice(&self, files: &[&str]) -> String {
        match files {
            [file] => self.text_with_args("error-file-missing", &[("file", *file)]),
            _ => {
                let separator = format!(" {} ", self.text("word-or"));
                let files = files.join(&separator);
                self.text_with_args("error-files-missing", &[("files", files.as_str())])
            }
        }
    }

    /// Plain-text notice for any other delivery fault
    pub fn delivery_error_notice(&self, error: &str) -> String {
        self.text_with_args("error-delivery", &[("error", error)])
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(message) = self.bundle.get_message(key) else {
            return format!("Missing translation: {key}");
        };
        let Some(pattern) = message.value() else {
            return format!("Missing value for key: {key}");
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, errors = ?errors, "Message formatted with errors");
        }
        value.into_owned()
    }
}
