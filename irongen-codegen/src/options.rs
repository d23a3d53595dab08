//! Generation options.

use serde::{Deserialize, Serialize};

/// Text of the comment added to every generated file.
pub const GENERATED_COMMENT: &str = "Generated by irongen";

/// Options controlling what the pipeline produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeOptions {
    /// Namespace for types that do not declare their own.
    pub package: String,
    /// Make every generated field final and drop setters.
    pub immutable: bool,
    /// Turn type and property descriptions into doc comments.
    pub include_comments: bool,
    /// Add a generated-code marker to every file.
    pub include_generated_comment: bool,
    /// Keep properties whose type only admits null.
    pub include_always_null_properties: bool,
    /// Prefix prepended to every backing field name.
    pub field_prefix: String,
    /// Move types referenced from a single declaration into that declaration.
    pub compress_solo_referenced_types: bool,
    /// Refer to nested types by their simple name only.
    pub shorten_nested_type_names: bool,
    /// Replace generic parameters that always receive the same type.
    pub simplify_generics: bool,
    /// Keep nullability differences apart when simplifying generics.
    pub allow_primitive_generics: bool,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            package: "generated".to_string(),
            immutable: false,
            include_comments: true,
            include_generated_comment: true,
            include_always_null_properties: false,
            field_prefix: String::new(),
            compress_solo_referenced_types: false,
            shorten_nested_type_names: false,
            simplify_generics: true,
            allow_primitive_generics: false,
        }
    }
}

impl CodeOptions {
    /// Starts a builder from the defaults.
    #[must_use]
    pub fn builder() -> CodeOptionsBuilder {
        CodeOptionsBuilder::new()
    }
}

/// Builder for [`CodeOptions`].
#[derive(Debug, Clone, Default)]
pub struct CodeOptionsBuilder {
    options: CodeOptions,
}

impl CodeOptionsBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default namespace.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.options.package = package.into();
        self
    }

    /// Makes fields final.
    #[must_use]
    pub fn immutable(mut self, immutable: bool) -> Self {
        self.options.immutable = immutable;
        self
    }

    /// Enables doc comments.
    #[must_use]
    pub fn include_comments(mut self, include: bool) -> Self {
        self.options.include_comments = include;
        self
    }

    /// Enables the generated-code marker.
    #[must_use]
    pub fn include_generated_comment(mut self, include: bool) -> Self {
        self.options.include_generated_comment = include;
        self
    }

    /// Keeps always-null properties.
    #[must_use]
    pub fn include_always_null_properties(mut self, include: bool) -> Self {
        self.options.include_always_null_properties = include;
        self
    }

    /// Sets the backing field prefix.
    #[must_use]
    pub fn field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.field_prefix = prefix.into();
        self
    }

    /// Enables nesting of singly referenced types.
    #[must_use]
    pub fn compress_solo_referenced_types(mut self, compress: bool) -> Self {
        self.options.compress_solo_referenced_types = compress;
        self
    }

    /// Uses simple names for nested types.
    #[must_use]
    pub fn shorten_nested_type_names(mut self, shorten: bool) -> Self {
        self.options.shorten_nested_type_names = shorten;
        self
    }

    /// Enables generic simplification.
    #[must_use]
    pub fn simplify_generics(mut self, simplify: bool) -> Self {
        self.options.simplify_generics = simplify;
        self
    }

    /// Keeps nullable and non-nullable generic arguments apart.
    #[must_use]
    pub fn allow_primitive_generics(mut self, allow: bool) -> Self {
        self.options.allow_primitive_generics = allow;
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> CodeOptions {
        self.options
    }
}
