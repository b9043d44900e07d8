//! Line-oriented axiom syntax
//!
//! One axiom per line; blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! Class: Person
//! ObjectProperty: hasChild
//! Individual: john
//! john Type: Person
//! john hasChild mary
//! Parent EquivalentTo: hasChild some Person
//! Parent SubClassOf: (hasChild some (likes some Thing))
//! ```
//!
//! Names are looked up by local name in the ontology signature; `<iri>`
//! spells out a full IRI. A declared name that is not in the signature yet is
//! minted in the ontology's namespace.

use logos::Logos;
use ontosat_core::{Axiom, ClassExpression, Entity, Individual, Iri, ObjectProperty, Ontology, OwlClass};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum Token<'s> {
    #[token("Class:")]
    ClassKeyword,

    #[token("ObjectProperty:")]
    ObjectPropertyKeyword,

    #[token("Individual:")]
    IndividualKeyword,

    #[token("Type:")]
    TypeKeyword,

    #[token("EquivalentTo:")]
    EquivalentToKeyword,

    #[token("SubClassOf:")]
    SubClassOfKeyword,

    #[token("some")]
    SomeKeyword,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"<[^<>\s]*>", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    Iri(&'s str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice())]
    Name(&'s str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ClassKeyword => write!(f, "Class:"),
            Token::ObjectPropertyKeyword => write!(f, "ObjectProperty:"),
            Token::IndividualKeyword => write!(f, "Individual:"),
            Token::TypeKeyword => write!(f, "Type:"),
            Token::EquivalentToKeyword => write!(f, "EquivalentTo:"),
            Token::SubClassOfKeyword => write!(f, "SubClassOf:"),
            Token::SomeKeyword => write!(f, "some"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Iri(iri) => write!(f, "<{}>", iri),
            Token::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Class,
    ObjectProperty,
    Individual,
}

impl Kind {
    fn matches(&self, entity: &Entity) -> bool {
        matches!(
            (self, entity),
            (Kind::Class, Entity::Class(_))
                | (Kind::ObjectProperty, Entity::ObjectProperty(_))
                | (Kind::Individual, Entity::NamedIndividual(_))
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Class => write!(f, "class"),
            Kind::ObjectProperty => write!(f, "object property"),
            Kind::Individual => write!(f, "individual"),
        }
    }
}

/// Parses one line; `Ok(None)` for blank and comment lines.
pub fn parse_line(ontology: &Ontology, line: &str) -> Result<Option<Axiom>, SyntaxError> {
    parse_numbered(ontology, line, 1)
}

/// Parses every line, adding each axiom to `ontology` before the next line is
/// read. Returns the parsed axioms in line order.
pub fn parse_document(ontology: &mut Ontology, text: &str) -> Result<Vec<Axiom>, SyntaxError> {
    let mut axioms = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(axiom) = parse_numbered(ontology, line, index + 1)? {
            ontology.add_axiom(axiom.clone());
            axioms.push(axiom);
        }
    }

    Ok(axioms)
}

fn parse_numbered(ontology: &Ontology, line: &str, number: usize) -> Result<Option<Axiom>, SyntaxError> {
    let content = line.trim();
    if content.is_empty() || content.starts_with('#') {
        return Ok(None);
    }

    let mut lexer = Token::lexer(content);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(SyntaxError::new(number, format!("unexpected input '{}'", lexer.slice())));
            }
        }
    }

    let mut parser = LineParser {
        ontology,
        tokens,
        position: 0,
        line: number,
    };
    parser.axiom().map(Some)
}

struct LineParser<'o, 's> {
    ontology: &'o Ontology,
    tokens: Vec<Token<'s>>,
    position: usize,
    line: usize,
}

impl<'o, 's> LineParser<'o, 's> {
    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.line, message)
    }

    fn unexpected(&self, token: Token<'s>) -> SyntaxError {
        self.error(format!("unexpected '{}'", token))
    }

    fn peek(&self) -> Option<Token<'s>> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Result<Token<'s>, SyntaxError> {
        let token = self.peek().ok_or_else(|| self.error("unexpected end of line"))?;
        self.position += 1;
        Ok(token)
    }

    fn axiom(&mut self) -> Result<Axiom, SyntaxError> {
        let axiom = match self.next()? {
            Token::ClassKeyword => Axiom::Declaration(Entity::Class(OwlClass(self.declared(Kind::Class)?))),
            Token::ObjectPropertyKeyword => {
                Axiom::Declaration(Entity::ObjectProperty(ObjectProperty(self.declared(Kind::ObjectProperty)?)))
            }
            Token::IndividualKeyword => {
                Axiom::Declaration(Entity::NamedIndividual(Individual(self.declared(Kind::Individual)?)))
            }
            subject @ (Token::Name(_) | Token::Iri(_)) => self.statement(subject)?,
            other => return Err(self.unexpected(other)),
        };

        match self.peek() {
            None => Ok(axiom),
            Some(extra) => Err(self.unexpected(extra)),
        }
    }

    /// Everything that starts with a name: `x Type: C`, `C EquivalentTo: D`,
    /// `C SubClassOf: D` and `x p y`.
    fn statement(&mut self, subject: Token<'s>) -> Result<Axiom, SyntaxError> {
        match self.next()? {
            Token::TypeKeyword => {
                let individual = Individual(self.resolve(subject, Kind::Individual)?);
                Ok(Axiom::class_assertion(self.class_expression()?, individual))
            }
            Token::EquivalentToKeyword => {
                let class = self.class(subject)?;
                Ok(Axiom::EquivalentClasses(class, self.class_expression()?))
            }
            Token::SubClassOfKeyword => {
                let class = self.class(subject)?;
                Ok(Axiom::SubClassOf(class, self.class_expression()?))
            }
            property @ (Token::Name(_) | Token::Iri(_)) => {
                let subject = Individual(self.resolve(subject, Kind::Individual)?);
                let property = ObjectProperty(self.resolve(property, Kind::ObjectProperty)?);
                let object = self.next()?;
                let object = Individual(self.resolve(object, Kind::Individual)?);
                Ok(Axiom::property_assertion(property, subject, object))
            }
            other => Err(self.unexpected(other)),
        }
    }

    fn class_expression(&mut self) -> Result<ClassExpression, SyntaxError> {
        match self.next()? {
            Token::LParen => {
                let expression = self.class_expression()?;
                match self.next()? {
                    Token::RParen => Ok(expression),
                    other => Err(self.unexpected(other)),
                }
            }
            token @ (Token::Name(_) | Token::Iri(_)) => {
                if self.peek() == Some(Token::SomeKeyword) {
                    self.position += 1;
                    let property = ObjectProperty(self.resolve(token, Kind::ObjectProperty)?);
                    let filler = self.class_expression()?;
                    Ok(ClassExpression::some(property, filler))
                } else {
                    self.class(token)
                }
            }
            other => Err(self.unexpected(other)),
        }
    }

    fn class(&self, token: Token<'s>) -> Result<ClassExpression, SyntaxError> {
        if token == Token::Name("Thing") {
            return Ok(ClassExpression::thing());
        }
        Ok(OwlClass(self.resolve(token, Kind::Class)?).into())
    }

    /// Name of a declaration; unknown short names are minted.
    fn declared(&mut self, kind: Kind) -> Result<Iri, SyntaxError> {
        let token = self.next()?;

        if let Token::Name(name) = token {
            let known = self
                .ontology
                .find_by_local_name(name)
                .iter()
                .any(|entity| kind.matches(entity));
            if !known {
                let namespace = self.ontology.namespace().ok_or_else(|| {
                    self.error(format!("cannot mint an IRI for '{}': the ontology has no IRI", name))
                })?;
                return Ok(Iri::new(format!("{}{}", namespace, name)));
            }
        }

        self.resolve(token, kind)
    }

    fn resolve(&self, token: Token<'s>, kind: Kind) -> Result<Iri, SyntaxError> {
        match token {
            Token::Iri(iri) => Iri::parse(iri).map_err(|e| self.error(e.to_string())),
            Token::Name(name) => {
                let candidates: Vec<Entity> = self
                    .ontology
                    .find_by_local_name(name)
                    .into_iter()
                    .filter(|entity| kind.matches(entity))
                    .collect();

                match candidates.as_slice() {
                    [entity] => Ok(entity.iri().clone()),
                    [] => Err(self.error(format!("unknown {} '{}'", kind, name))),
                    _ => Err(self.error(format!("ambiguous {} '{}'", kind, name))),
                }
            }
            other => Err(self.unexpected(other)),
        }
    }
}
