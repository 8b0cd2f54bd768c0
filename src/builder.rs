use crate::config::Config;
use crate::decode::{self, DefaultLog};
use crate::error::{BarError, ParseError};
use crate::markup::{self, StyledFragment};
use crate::ops::{self, ParseReport};
use crate::template::{self, Aligned, ResolvedSegment, TemplateContext};
use crate::types::ParseAction;

/// A decoded config together with the alias table its templates resolve
/// against.
#[derive(Debug, Clone)]
pub struct BarParser {
    config: Config,
    context: TemplateContext,
    defaults: DefaultLog,
}

impl BarParser {
    pub fn builder() -> BarParserBuilder {
        BarParserBuilder::new()
    }

    /// Wrap an already-built config. No fields count as defaulted.
    pub fn new(config: Config) -> Self {
        Self::from_parts(config, DefaultLog::default())
    }

    fn from_parts(config: Config, defaults: DefaultLog) -> Self {
        let context = config.template_context();
        Self {
            config,
            context,
            defaults,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fields the source left out.
    pub fn defaults(&self) -> &DefaultLog {
        &self.defaults
    }

    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    /// Parse markup with the config's `fgColor` as ambient color.
    pub fn markup(&self, input: &str) -> Vec<StyledFragment> {
        markup::parse_markup(&self.config.fg_color, input)
    }

    /// The config's own template, resolved.
    pub fn template(&self) -> Vec<ResolvedSegment> {
        self.parse_template(&self.config.template)
    }

    /// Tokenize and resolve `input` with the config's `sepChar`.
    pub fn parse_template(&self, input: &str) -> Vec<ResolvedSegment> {
        template::parse_template(self.config.sep_char, &self.context, input)
    }

    /// The config's template split by `alignSep`, each part resolved.
    pub fn aligned_template(&self) -> Aligned<Vec<ResolvedSegment>> {
        self.config
            .aligned_template()
            .map(|part| self.parse_template(part))
    }

    /// Handle a `ParseAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &ParseAction) -> Result<(), BarError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ParseAction` (list / gen / defaults / markup / template).
    pub fn handle(&self, action: &ParseAction) -> Result<ParseReport, BarError> {
        match action {
            ParseAction::List => Ok(ops::list_fields(&self.config)?),
            ParseAction::Gen => Ok(ops::generate_source(&self.config)?),
            ParseAction::Defaults => Ok(ParseReport::Defaults(self.defaults.clone())),
            ParseAction::Markup { input, color } => {
                let ambient = color.as_deref().unwrap_or(&self.config.fg_color);
                Ok(ops::markup_fragments(ambient, input))
            }
            ParseAction::Template { input } => {
                let input = input.as_deref().unwrap_or(&self.config.template);
                Ok(ops::template_segments(&self.config, &self.context, input))
            }
        }
    }
}

/// Builder for decoding a config block into a [`BarParser`].
///
/// Without a [`source()`](Self::source) the baseline is used as is.
pub struct BarParserBuilder {
    baseline: Option<Config>,
    source: Option<String>,
    log_defaults: bool,
}

impl BarParserBuilder {
    fn new() -> Self {
        Self {
            baseline: None,
            source: None,
            log_defaults: true,
        }
    }

    /// Record supplying absent fields (default: [`Config::default`]).
    pub fn baseline(mut self, config: Config) -> Self {
        self.baseline = Some(config);
        self
    }

    /// Config block text to decode.
    pub fn source(mut self, text: impl Into<String>) -> Self {
        self.source = Some(text.into());
        self
    }

    /// Report defaulted fields at info level (default: `true`). When off
    /// they are reported at debug level.
    pub fn log_defaults(mut self, enabled: bool) -> Self {
        self.log_defaults = enabled;
        self
    }

    fn effective_baseline(&self) -> Config {
        self.baseline.clone().unwrap_or_default()
    }

    /// Decode the source against the baseline.
    pub fn build(self) -> Result<BarParser, ParseError> {
        let baseline = self.effective_baseline();
        let Some(source) = &self.source else {
            return Ok(BarParser::new(baseline));
        };

        let (config, defaults) = decode::decode(source, &baseline)?.into_parts();
        if !defaults.is_empty() {
            if self.log_defaults {
                tracing::info!(fields = %defaults, "config fields left at default");
            } else {
                tracing::debug!(fields = %defaults, "config fields left at default");
            }
        }
        Ok(BarParser::from_parts(config, defaults))
    }

    /// Like [`build`](Self::build), but a source that fails to decode is
    /// logged and replaced by the baseline.
    pub fn build_or_baseline(self) -> BarParser {
        let baseline = self.effective_baseline();
        match self.build() {
            Ok(parser) => parser,
            Err(err) => {
                tracing::warn!(%err, "config could not be decoded, using defaults");
                BarParser::new(baseline)
            }
        }
    }
}
