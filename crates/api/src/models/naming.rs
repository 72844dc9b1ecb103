use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a type and its members (methods, fields, properties).
pub const MEMBER_SEPARATOR: char = '#';

/// Separator between package segments and between package and class.
pub const TYPE_SEPARATOR: char = '.';

/// Separator between an outer class and a nested class.
pub const NESTED_SEPARATOR: char = '$';

/// Marker appended to context simple names once per closure nesting level.
pub const LAMBDA_MARKER: &str = "$Lambda";

/// Canonical simple name of constructor methods.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Identifier bound to the enclosing instance inside a method body.
pub const SELF_REFERENCE: &str = "this";

/// Identifier bound to the superclass view of the enclosing instance.
pub const SUPER_REFERENCE: &str = "super";

/// Prefix synthesized onto a property name to form its backing field.
pub const PROPERTY_BACKING_PREFIX: &str = "_";

/// A fully qualified type name.
///
/// Dot-separated package segments, `$` for nested classes
/// (e.g. `org.acme.Outer$Inner`). Names arrive from the front end and are
/// carried verbatim; no grammar is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self(fqn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The segment after the last package separator.
    ///
    /// # Examples
    /// ```ignore
    /// TypeName::new("org.acme.Widget").simple_name() // "Widget"
    /// ```
    pub fn simple_name(&self) -> &str {
        self.0
            .rfind(TYPE_SEPARATOR)
            .map(|pos| &self.0[pos + 1..])
            .unwrap_or(&self.0)
    }

    /// The package part, when the name is qualified.
    pub fn package(&self) -> Option<&str> {
        self.0.rfind(TYPE_SEPARATOR).map(|pos| &self.0[..pos])
    }

    /// A copy of this name with one `$Lambda` marker appended to its simple
    /// name. Applying it again yields `$Lambda$Lambda`, and so on per level.
    pub fn with_lambda_marker(&self) -> TypeName {
        TypeName(format!("{}{}", self.0, LAMBDA_MARKER))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(fqn: &str) -> Self {
        Self::new(fqn)
    }
}

impl From<String> for TypeName {
    fn from(fqn: String) -> Self {
        Self(fqn)
    }
}

/// A method identifier: declaring type, return type, simple name and
/// parameter types. Displayed as `declaring#name(p0, p1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodName {
    pub declaring_type: TypeName,
    pub return_type: TypeName,
    pub name: String,
    pub parameters: Vec<TypeName>,
}

impl MethodName {
    pub fn new(
        declaring_type: TypeName,
        return_type: TypeName,
        name: impl Into<String>,
        parameters: Vec<TypeName>,
    ) -> Self {
        Self {
            declaring_type,
            return_type,
            name: name.into(),
            parameters,
        }
    }

    /// A constructor of `declaring_type`: named `<init>`, returning the
    /// declaring type itself.
    pub fn constructor(declaring_type: TypeName, parameters: Vec<TypeName>) -> Self {
        let return_type = declaring_type.clone();
        Self {
            declaring_type,
            return_type,
            name: CONSTRUCTOR_NAME.to_string(),
            parameters,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// A copy with one `$Lambda` marker appended to the simple name.
    /// Declaring and return types are untouched.
    pub fn with_lambda_marker(&self) -> MethodName {
        MethodName {
            name: format!("{}{}", self.name, LAMBDA_MARKER),
            ..self.clone()
        }
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}(",
            self.declaring_type, MEMBER_SEPARATOR, self.name
        )?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ")")
    }
}

/// A field identifier. Displayed as `declaring#name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldName {
    pub declaring_type: TypeName,
    pub value_type: TypeName,
    pub name: String,
}

impl FieldName {
    pub fn new(declaring_type: TypeName, value_type: TypeName, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            value_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.declaring_type, MEMBER_SEPARATOR, self.name)
    }
}

/// A property identifier. Properties are surface syntax over a synthesized
/// backing field named `_<property>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyName {
    pub declaring_type: TypeName,
    pub value_type: TypeName,
    pub name: String,
}

impl PropertyName {
    pub fn new(declaring_type: TypeName, value_type: TypeName, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            value_type,
            name: name.into(),
        }
    }

    /// The backing field this property reads and writes.
    pub fn backing_field(&self) -> FieldName {
        FieldName {
            declaring_type: self.declaring_type.clone(),
            value_type: self.value_type.clone(),
            name: format!("{}{}", PROPERTY_BACKING_PREFIX, self.name),
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.declaring_type, MEMBER_SEPARATOR, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_and_package() {
        let name = TypeName::new("org.acme.Widget");
        assert_eq!(name.simple_name(), "Widget");
        assert_eq!(name.package(), Some("org.acme"));

        let unqualified = TypeName::new("Widget");
        assert_eq!(unqualified.simple_name(), "Widget");
        assert_eq!(unqualified.package(), None);
    }

    #[test]
    fn test_nested_class_keeps_outer_in_simple_name() {
        let name = TypeName::new("org.acme.Outer$Inner");
        assert_eq!(name.simple_name(), "Outer$Inner");
    }

    #[test]
    fn test_lambda_marker_stacks_per_level() {
        let name = TypeName::new("org.acme.Widget");
        let once = name.with_lambda_marker();
        assert_eq!(once.as_str(), "org.acme.Widget$Lambda");
        assert_eq!(
            once.with_lambda_marker().as_str(),
            "org.acme.Widget$Lambda$Lambda"
        );
    }

    #[test]
    fn test_constructor_returns_its_declaring_type() {
        let ctor = MethodName::constructor(TypeName::new("org.acme.Widget"), vec![]);
        assert!(ctor.is_constructor());
        assert_eq!(ctor.return_type, ctor.declaring_type);
        assert_eq!(ctor.to_string(), "org.acme.Widget#<init>()");
    }

    #[test]
    fn test_method_display_lists_parameters() {
        let method = MethodName::new(
            TypeName::new("org.acme.Widget"),
            TypeName::new("void"),
            "resize",
            vec![TypeName::new("int"), TypeName::new("int")],
        );
        assert_eq!(method.to_string(), "org.acme.Widget#resize(int, int)");
    }

    #[test]
    fn test_lambda_marker_only_renames_the_simple_name() {
        let method = MethodName::new(
            TypeName::new("org.acme.Widget"),
            TypeName::new("void"),
            "resize",
            vec![],
        );
        let renamed = method.with_lambda_marker();
        assert_eq!(renamed.name, "resize$Lambda");
        assert_eq!(renamed.declaring_type, method.declaring_type);
        assert_eq!(renamed.return_type, method.return_type);
    }

    #[test]
    fn test_property_backing_field() {
        let property = PropertyName::new(
            TypeName::new("org.acme.Widget"),
            TypeName::new("java.lang.String"),
            "Label",
        );
        let field = property.backing_field();
        assert_eq!(field.name, "_Label");
        assert_eq!(field.declaring_type, property.declaring_type);
        assert_eq!(field.value_type, property.value_type);
    }
}
