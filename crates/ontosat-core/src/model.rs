//! OWL data model: entities, class expressions and axioms

use crate::vocabulary;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OWL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(pub String);

impl Iri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Checked constructor used for IRIs coming from user input.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        if s.is_empty() {
            return Err(ModelError::InvalidIri("IRI cannot be empty".to_string()));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '<' || c == '>' || c == '"') {
            return Err(ModelError::InvalidIri(format!("illegal character in <{}>", s)));
        }
        if !s.contains(':') {
            return Err(ModelError::InvalidIri(format!("<{}> is not absolute", s)));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte offset where the local name starts: after the last `#`,
    /// otherwise after the last `/`, otherwise after the last `:`.
    fn split_index(&self) -> usize {
        self.0
            .rfind('#')
            .or_else(|| self.0.rfind('/'))
            .or_else(|| self.0.rfind(':'))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Namespace part, including the trailing separator.
    pub fn namespace(&self) -> &str {
        &self.0[..self.split_index()]
    }

    /// Remainder after the namespace.
    pub fn local_name(&self) -> &str {
        &self.0[self.split_index()..]
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

/// Named OWL class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwlClass(pub Iri);

impl OwlClass {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(Iri::new(iri))
    }

    /// owl:Thing (⊤)
    pub fn thing() -> Self {
        Self::new(vocabulary::OWL_THING)
    }

    pub fn is_thing(&self) -> bool {
        self.0.as_str() == vocabulary::OWL_THING
    }

    pub fn iri(&self) -> &Iri {
        &self.0
    }
}

/// Named object property (role)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectProperty(pub Iri);

impl ObjectProperty {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(Iri::new(iri))
    }

    pub fn iri(&self) -> &Iri {
        &self.0
    }
}

/// Named individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Individual(pub Iri);

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(Iri::new(iri))
    }

    pub fn iri(&self) -> &Iri {
        &self.0
    }
}

/// Class expression: a named class or an existential restriction ∃R.C
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassExpression {
    /// Named class
    Class(OwlClass),

    /// Existential restriction: ∃R.C
    ObjectSomeValuesFrom {
        property: ObjectProperty,
        filler: Box<ClassExpression>,
    },
}

impl ClassExpression {
    /// Builds ∃property.filler
    pub fn some(property: ObjectProperty, filler: ClassExpression) -> Self {
        ClassExpression::ObjectSomeValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn thing() -> Self {
        ClassExpression::Class(OwlClass::thing())
    }

    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            ClassExpression::Class(class) => Some(class),
            ClassExpression::ObjectSomeValuesFrom { .. } => None,
        }
    }

    pub fn is_atomic(&self) -> bool {
        self.as_class().is_some()
    }

    /// Number of nested restrictions; 0 for a named class.
    pub fn depth(&self) -> usize {
        match self {
            ClassExpression::Class(_) => 0,
            ClassExpression::ObjectSomeValuesFrom { filler, .. } => 1 + filler.depth(),
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(class: OwlClass) -> Self {
        ClassExpression::Class(class)
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassExpression::Class(class) => write!(f, "{}", class.0.local_name()),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                if filler.is_atomic() {
                    write!(f, "∃{}.{}", property.0.local_name(), filler)
                } else {
                    write!(f, "∃{}.({})", property.0.local_name(), filler)
                }
            }
        }
    }
}

/// Entity that can be declared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Class(OwlClass),
    ObjectProperty(ObjectProperty),
    NamedIndividual(Individual),
}

impl Entity {
    pub fn iri(&self) -> &Iri {
        match self {
            Entity::Class(c) => &c.0,
            Entity::ObjectProperty(p) => &p.0,
            Entity::NamedIndividual(i) => &i.0,
        }
    }
}

/// OWL axiom subset handled by the saturator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axiom {
    /// Declaration(Entity)
    Declaration(Entity),

    /// ClassAssertion(C i)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },

    /// ObjectPropertyAssertion(P i1 i2)
    ObjectPropertyAssertion {
        property: ObjectProperty,
        subject: Individual,
        object: Individual,
    },

    /// EquivalentClasses(C1 C2)
    EquivalentClasses(ClassExpression, ClassExpression),

    /// SubClassOf(C1 C2)
    SubClassOf(ClassExpression, ClassExpression),
}

/// Discriminant of [`Axiom`], used for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum AxiomKind {
    Declaration,
    ClassAssertion,
    ObjectPropertyAssertion,
    EquivalentClasses,
    SubClassOf,
}

impl Axiom {
    pub fn class_assertion(class: impl Into<ClassExpression>, individual: Individual) -> Self {
        Axiom::ClassAssertion {
            class: class.into(),
            individual,
        }
    }

    pub fn property_assertion(property: ObjectProperty, subject: Individual, object: Individual) -> Self {
        Axiom::ObjectPropertyAssertion {
            property,
            subject,
            object,
        }
    }

    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::Declaration(_) => AxiomKind::Declaration,
            Axiom::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            Axiom::EquivalentClasses(_, _) => AxiomKind::EquivalentClasses,
            Axiom::SubClassOf(_, _) => AxiomKind::SubClassOf,
        }
    }

    /// Returns the class expression if this is a class assertion about `individual`.
    pub fn class_asserted_for(&self, individual: &Individual) -> Option<&ClassExpression> {
        match self {
            Axiom::ClassAssertion {
                class,
                individual: subject,
            } if subject == individual => Some(class),
            _ => None,
        }
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axiom::Declaration(entity) => match entity {
                Entity::Class(c) => write!(f, "Declaration(Class({}))", c.0),
                Entity::ObjectProperty(p) => write!(f, "Declaration(ObjectProperty({}))", p.0),
                Entity::NamedIndividual(i) => write!(f, "Declaration(NamedIndividual({}))", i.0),
            },
            Axiom::ClassAssertion { class, individual } => {
                write!(f, "{}({})", class, individual.0.local_name())
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => write!(
                f,
                "{}({}, {})",
                property.0.local_name(),
                subject.0.local_name(),
                object.0.local_name()
            ),
            Axiom::EquivalentClasses(a, b) => write!(f, "{} ≡ {}", a, b),
            Axiom::SubClassOf(a, b) => write!(f, "{} ⊑ {}", a, b),
        }
    }
}
