// Structural metadata extracted from parsed source files.
//
// These types make up the per-module report and are serialized as-is into
// the JSON artifact.

use serde::{Deserialize, Serialize};

/// One formal parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Type annotation as source text
    pub annotation: Option<String>,
    /// Default value as source text, only set when the parameter has one
    pub default: Option<String>,
}

impl ParameterInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
            default: None,
        }
    }

    pub fn with_annotation(name: &str, annotation: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: Some(annotation.to_string()),
            default: None,
        }
    }

    pub fn with_default(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
            default: Some(default.to_string()),
        }
    }
}

impl std::fmt::Display for ParameterInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref a) = self.annotation {
            write!(f, ": {}", a)?;
        }
        if let Some(ref d) = self.default {
            if self.annotation.is_some() {
                write!(f, " = {}", d)?;
            } else {
                write!(f, "={}", d)?;
            }
        }
        Ok(())
    }
}

/// A `*args`- or `**kwargs`-style catch-all parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariadicInfo {
    pub name: String,
    pub annotation: Option<String>,
}

impl VariadicInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
        }
    }
}

/// Decomposed callable signature
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignatureInfo {
    /// Position-only and regular positional parameters, declaration order
    pub positional: Vec<ParameterInfo>,
    /// Keyword-only parameters, declaration order
    pub keyword_only: Vec<ParameterInfo>,
    pub vararg: Option<VariadicInfo>,
    pub kwarg: Option<VariadicInfo>,
    /// Return-type annotation as source text
    pub returns: Option<String>,
}

impl SignatureInfo {
    /// Render the parameter list the way it would appear in a `def` line
    pub fn format_params(&self) -> String {
        let mut parts: Vec<String> = self.positional.iter().map(|p| p.to_string()).collect();

        if let Some(ref v) = self.vararg {
            match v.annotation {
                Some(ref a) => parts.push(format!("*{}: {}", v.name, a)),
                None => parts.push(format!("*{}", v.name)),
            }
        } else if !self.keyword_only.is_empty() {
            parts.push("*".to_string());
        }

        parts.extend(self.keyword_only.iter().map(|p| p.to_string()));

        if let Some(ref k) = self.kwarg {
            match k.annotation {
                Some(ref a) => parts.push(format!("**{}: {}", k.name, a)),
                None => parts.push(format!("**{}", k.name)),
            }
        }

        parts.join(", ")
    }
}

/// Classification of a decorator, computed once during extraction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DecoratorKind {
    /// `@property`
    PropertyGetter,
    /// `@name.setter`
    PropertySetter,
    Other,
}

impl DecoratorKind {
    /// Classify rendered decorator text (without the leading `@`)
    pub fn classify(text: &str) -> Self {
        if text == "property" {
            DecoratorKind::PropertyGetter
        } else if text.ends_with(".setter") {
            DecoratorKind::PropertySetter
        } else {
            DecoratorKind::Other
        }
    }

    pub fn is_property(self) -> bool {
        matches!(
            self,
            DecoratorKind::PropertyGetter | DecoratorKind::PropertySetter
        )
    }
}

/// A free function or a method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallableInfo {
    pub name: String,
    pub is_async: bool,
    /// Decorator expressions as source text, without the `@`
    pub decorators: Vec<String>,
    pub signature: SignatureInfo,
    pub docstring: Option<String>,
}

impl CallableInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_async: false,
            decorators: Vec::new(),
            signature: SignatureInfo::default(),
            docstring: None,
        }
    }

    /// Whether any decorator marks this as a property getter or setter
    pub fn is_property(&self) -> bool {
        self.decorators
            .iter()
            .any(|d| DecoratorKind::classify(d).is_property())
    }

    /// The callable as a `def` line
    pub fn signature_line(&self) -> String {
        let prefix = if self.is_async { "async " } else { "" };
        let ret = self
            .signature
            .returns
            .as_ref()
            .map(|r| format!(" -> {}", r))
            .unwrap_or_default();
        format!(
            "{}def {}({}){}",
            prefix,
            self.name,
            self.signature.format_params(),
            ret
        )
    }
}

/// A class definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassInfo {
    pub name: String,
    /// Base classes as written, dotted text preserved
    pub bases: Vec<String>,
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
    pub methods: Vec<CallableInfo>,
    /// Names of methods decorated as property getters or setters
    pub properties: Vec<String>,
    pub class_variables: Vec<VariableInfo>,
}

impl ClassInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bases: Vec::new(),
            decorators: Vec::new(),
            docstring: None,
            methods: Vec::new(),
            properties: Vec::new(),
            class_variables: Vec::new(),
        }
    }
}

/// A module-level or class-level variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableInfo {
    pub name: String,
    pub annotation: Option<String>,
    /// Initializer as source text, best effort
    pub value: Option<String>,
}

impl VariableInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
            value: None,
        }
    }
}

/// One `from M import ...` clause
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FromImport {
    /// Dotted module, leading dots kept for relative imports
    pub module: String,
    /// Imported names, alias text preserved as `"name as alias"`
    pub names: Vec<String>,
}

/// All imports of one module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportInfo {
    /// `import X` entries, alias text preserved as `"X as Y"`
    pub plain_imports: Vec<String>,
    pub from_imports: Vec<FromImport>,
}

impl ImportInfo {
    pub fn is_empty(&self) -> bool {
        self.plain_imports.is_empty() && self.from_imports.is_empty()
    }
}

/// Structural report for one source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleReport {
    /// Path relative to the scan root, forward-slash separated
    pub path: String,
    pub docstring: Option<String>,
    pub classes: Vec<ClassInfo>,
    pub functions: Vec<CallableInfo>,
    pub imports: ImportInfo,
    pub module_variables: Vec<VariableInfo>,
    /// Diagnostics for files that could not be read or parsed
    pub errors: Vec<String>,
}

impl ModuleReport {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            docstring: None,
            classes: Vec::new(),
            functions: Vec::new(),
            imports: ImportInfo::default(),
            module_variables: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Report for a file that failed to read or parse: all structural
    /// fields empty, one diagnostic recorded.
    pub fn failed(path: &str, error: impl Into<String>) -> Self {
        let mut report = Self::new(path);
        report.errors.push(error.into());
        report
    }

    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty()
    }
}
