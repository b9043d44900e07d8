//! RDF (RDF/XML / Turtle / N-Triples) mapping
//!
//! Only the OWL subset the saturator works with is read:
//!
//! | Triple | Axiom |
//! |---|---|
//! | `x rdf:type owl:Class` / `owl:ObjectProperty` / `owl:NamedIndividual` | declaration |
//! | `x rdf:type owl:Ontology` | ontology IRI |
//! | `x rdf:type C` | class assertion (`C` named or a restriction node) |
//! | `C owl:equivalentClass D` | equivalent classes |
//! | `C rdfs:subClassOf D` | subclass |
//! | `x p y` (IRIs, `p` outside the reserved vocabularies) | object property assertion |
//!
//! A restriction node is a blank node with `owl:onProperty` and
//! `owl:someValuesFrom`; fillers may themselves be restriction nodes.
//! Anything else is skipped and reported once with `warn!`.

use crate::ProviderError;
use ontosat_core::vocabulary;
use ontosat_core::{Axiom, ClassExpression, Entity, Individual, Iri, ObjectProperty, Ontology, OwlClass};
use oxrdf::{
    BlankNode, BlankNodeRef, Graph, NamedNode, NamedNodeRef, NamedOrBlankNode, Subject, SubjectRef, Term, TermRef, Triple,
    TripleRef,
};
use oxrdfxml::{RdfXmlParser, RdfXmlSerializer};
use oxttl::{NTriplesParser, NTriplesSerializer, TurtleParser, TurtleSerializer};
use std::io::{Read, Write};
use tracing::{trace, warn};

const RDF_TYPE: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::RDF_TYPE);
const RDFS_SUBCLASS_OF: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::RDFS_SUBCLASS_OF);
const OWL_ONTOLOGY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_ONTOLOGY);
const OWL_CLASS: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_CLASS);
const OWL_THING: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_THING);
const OWL_OBJECT_PROPERTY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_OBJECT_PROPERTY);
const OWL_NAMED_INDIVIDUAL: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_NAMED_INDIVIDUAL);
const OWL_RESTRICTION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_RESTRICTION);
const OWL_ON_PROPERTY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_ON_PROPERTY);
const OWL_SOME_VALUES_FROM: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_SOME_VALUES_FROM);
const OWL_EQUIVALENT_CLASS: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(vocabulary::OWL_EQUIVALENT_CLASS);

fn parse_failure(error: impl std::fmt::Display) -> ProviderError {
    ProviderError::ParseFailure(error.to_string())
}

fn storage_failure(error: impl std::fmt::Display) -> ProviderError {
    ProviderError::StorageFailure(error.to_string())
}

pub fn read_turtle(reader: impl Read) -> Result<Ontology, ProviderError> {
    let mut graph = Graph::new();
    for triple in TurtleParser::new().for_reader(reader) {
        graph.insert(&triple.map_err(parse_failure)?);
    }
    ontology_from_graph(&graph)
}

pub fn read_ntriples(reader: impl Read) -> Result<Ontology, ProviderError> {
    let mut graph = Graph::new();
    for triple in NTriplesParser::new().for_reader(reader) {
        graph.insert(&triple.map_err(parse_failure)?);
    }
    ontology_from_graph(&graph)
}

pub fn read_rdf_xml(reader: impl Read) -> Result<Ontology, ProviderError> {
    let mut graph = Graph::new();
    for triple in RdfXmlParser::new().for_reader(reader) {
        graph.insert(&triple.map_err(parse_failure)?);
    }
    ontology_from_graph(&graph)
}

/// Maps an RDF graph onto the axiom model.
pub fn ontology_from_graph(graph: &Graph) -> Result<Ontology, ProviderError> {
    let mut reader = GraphReader { graph, skipped: 0 };
    let ontology = reader.read()?;

    if reader.skipped > 0 {
        warn!(
            skipped = reader.skipped,
            "Skipped triples outside the supported OWL subset"
        );
    }
    Ok(ontology)
}

struct GraphReader<'a> {
    graph: &'a Graph,
    skipped: usize,
}

impl<'a> GraphReader<'a> {
    fn read(&mut self) -> Result<Ontology, ProviderError> {
        let mut ontology = Ontology::new();

        let ontology_iri = self
            .graph
            .triples_for_predicate(RDF_TYPE)
            .filter(|triple| triple.object == TermRef::NamedNode(OWL_ONTOLOGY))
            .filter_map(|triple| match triple.subject {
                SubjectRef::NamedNode(node) => Some(node.as_str()),
                _ => None,
            })
            .min();
        if let Some(iri) = ontology_iri {
            ontology.set_iri(Iri::new(iri));
        }

        let graph = self.graph;
        for triple in graph.iter() {
            if let Some(axiom) = self.read_triple(triple)? {
                ontology.add_axiom(axiom);
            }
        }

        Ok(ontology)
    }

    fn read_triple(&mut self, triple: TripleRef<'a>) -> Result<Option<Axiom>, ProviderError> {
        let predicate = triple.predicate;

        if predicate == RDF_TYPE {
            return self.read_type(triple);
        }

        if predicate == OWL_EQUIVALENT_CLASS || predicate == RDFS_SUBCLASS_OF {
            let left = self.class_expression(triple.subject.into())?;
            let right = self.class_expression(triple.object)?;
            let (Some(left), Some(right)) = (left, right) else {
                return Ok(self.skip(triple));
            };
            return Ok(Some(if predicate == OWL_EQUIVALENT_CLASS {
                Axiom::EquivalentClasses(left, right)
            } else {
                Axiom::SubClassOf(left, right)
            }));
        }

        // restriction internals are read through the node that uses them
        if (predicate == OWL_ON_PROPERTY || predicate == OWL_SOME_VALUES_FROM)
            && matches!(triple.subject, SubjectRef::BlankNode(_))
        {
            return Ok(None);
        }

        match (triple.subject, triple.object) {
            (SubjectRef::NamedNode(subject), TermRef::NamedNode(object))
                if !vocabulary::is_reserved(predicate.as_str()) =>
            {
                Ok(Some(Axiom::property_assertion(
                    ObjectProperty::new(predicate.as_str()),
                    Individual::new(subject.as_str()),
                    Individual::new(object.as_str()),
                )))
            }
            _ => Ok(self.skip(triple)),
        }
    }

    fn read_type(&mut self, triple: TripleRef<'a>) -> Result<Option<Axiom>, ProviderError> {
        let SubjectRef::NamedNode(subject) = triple.subject else {
            if triple.object == TermRef::NamedNode(OWL_RESTRICTION) {
                return Ok(None);
            }
            return Ok(self.skip(triple));
        };
        let subject = subject.as_str();

        match triple.object {
            TermRef::NamedNode(object) if object == OWL_CLASS => {
                Ok(Some(Axiom::Declaration(Entity::Class(OwlClass::new(subject)))))
            }
            TermRef::NamedNode(object) if object == OWL_OBJECT_PROPERTY => Ok(Some(Axiom::Declaration(
                Entity::ObjectProperty(ObjectProperty::new(subject)),
            ))),
            TermRef::NamedNode(object) if object == OWL_NAMED_INDIVIDUAL => Ok(Some(Axiom::Declaration(
                Entity::NamedIndividual(Individual::new(subject)),
            ))),
            TermRef::NamedNode(object) if object == OWL_ONTOLOGY => Ok(None),
            TermRef::NamedNode(object) if object == OWL_THING || !vocabulary::is_reserved(object.as_str()) => Ok(Some(
                Axiom::class_assertion(OwlClass::new(object.as_str()), Individual::new(subject)),
            )),
            TermRef::BlankNode(_) => match self.class_expression(triple.object)? {
                Some(class) => Ok(Some(Axiom::class_assertion(class, Individual::new(subject)))),
                None => Ok(self.skip(triple)),
            },
            _ => Ok(self.skip(triple)),
        }
    }

    fn skip(&mut self, triple: TripleRef<'_>) -> Option<Axiom> {
        trace!(%triple, "skipped");
        self.skipped += 1;
        None
    }

    /// `None` for terms that are not a named class or a supported restriction.
    fn class_expression(&self, term: TermRef<'a>) -> Result<Option<ClassExpression>, ProviderError> {
        let mut path = Vec::new();
        self.class_expression_on_path(term, &mut path)
    }

    fn class_expression_on_path(
        &self,
        term: TermRef<'a>,
        path: &mut Vec<BlankNodeRef<'a>>,
    ) -> Result<Option<ClassExpression>, ProviderError> {
        let node = match term {
            TermRef::NamedNode(class) => return Ok(Some(OwlClass::new(class.as_str()).into())),
            TermRef::BlankNode(node) => node,
            _ => return Ok(None),
        };

        if path.contains(&node) {
            return Err(ProviderError::ParseFailure(format!(
                "cyclic class expression through blank node {}",
                node
            )));
        }

        let property = self.graph.object_for_subject_predicate(node, OWL_ON_PROPERTY);
        let filler = self.graph.object_for_subject_predicate(node, OWL_SOME_VALUES_FROM);
        let (Some(TermRef::NamedNode(property)), Some(filler)) = (property, filler) else {
            return Ok(None);
        };

        path.push(node);
        let filler = self.class_expression_on_path(filler, path)?;
        path.pop();

        Ok(filler.map(|filler| ClassExpression::some(ObjectProperty::new(property.as_str()), filler)))
    }
}

/// Triples for the ontology, in axiom order.
///
/// Restriction nodes are labelled `r0`, `r1`, ... in order of appearance, so
/// equal ontologies always produce equal output.
pub fn ontology_to_triples(ontology: &Ontology) -> Vec<Triple> {
    let mut writer = TripleWriter::default();

    if let Some(iri) = ontology.iri() {
        writer.push(named(iri).into(), RDF_TYPE, OWL_ONTOLOGY.into_owned().into());
    }
    for axiom in ontology.axioms() {
        writer.write_axiom(axiom);
    }

    writer.triples
}

fn named(iri: &Iri) -> NamedNode {
    NamedNode::new_unchecked(iri.as_str())
}

fn term(node: NamedOrBlankNode) -> Term {
    match node {
        NamedOrBlankNode::NamedNode(node) => node.into(),
        NamedOrBlankNode::BlankNode(node) => node.into(),
    }
}

fn subject(node: NamedOrBlankNode) -> Subject {
    match node {
        NamedOrBlankNode::NamedNode(node) => node.into(),
        NamedOrBlankNode::BlankNode(node) => node.into(),
    }
}

#[derive(Default)]
struct TripleWriter {
    triples: Vec<Triple>,
    blank_nodes: usize,
}

impl TripleWriter {
    fn push(&mut self, node: NamedOrBlankNode, predicate: NamedNodeRef<'_>, object: Term) {
        self.triples.push(Triple::new(subject(node), predicate.into_owned(), object));
    }

    fn write_axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::Declaration(entity) => {
                let kind = match entity {
                    Entity::Class(_) => OWL_CLASS,
                    Entity::ObjectProperty(_) => OWL_OBJECT_PROPERTY,
                    Entity::NamedIndividual(_) => OWL_NAMED_INDIVIDUAL,
                };
                self.push(named(entity.iri()).into(), RDF_TYPE, kind.into_owned().into());
            }
            Axiom::ClassAssertion { class, individual } => {
                let class = self.class_node(class);
                self.push(named(&individual.0).into(), RDF_TYPE, term(class));
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                let predicate = named(&property.0);
                self.push(named(&subject.0).into(), predicate.as_ref(), named(&object.0).into());
            }
            Axiom::EquivalentClasses(left, right) => {
                let left = self.class_node(left);
                let right = self.class_node(right);
                self.push(left, OWL_EQUIVALENT_CLASS, term(right));
            }
            Axiom::SubClassOf(sub, sup) => {
                let sub = self.class_node(sub);
                let sup = self.class_node(sup);
                self.push(sub, RDFS_SUBCLASS_OF, term(sup));
            }
        }
    }

    fn class_node(&mut self, class: &ClassExpression) -> NamedOrBlankNode {
        match class {
            ClassExpression::Class(class) => named(&class.0).into(),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let node = BlankNode::new_unchecked(format!("r{}", self.blank_nodes));
                self.blank_nodes += 1;

                let filler = self.class_node(filler);
                self.push(node.clone().into(), RDF_TYPE, OWL_RESTRICTION.into_owned().into());
                self.push(node.clone().into(), OWL_ON_PROPERTY, named(&property.0).into());
                self.push(node.clone().into(), OWL_SOME_VALUES_FROM, term(filler));
                node.into()
            }
        }
    }
}

/// Writes the ontology as Turtle with `owl:`, `rdf:` and `rdfs:` prefixes.
pub fn write_turtle<W: Write>(ontology: &Ontology, writer: W) -> Result<W, ProviderError> {
    let mut serializer = TurtleSerializer::new()
        .with_prefix("owl", vocabulary::OWL_NAMESPACE)
        .and_then(|s| s.with_prefix("rdf", vocabulary::RDF_NAMESPACE))
        .and_then(|s| s.with_prefix("rdfs", vocabulary::RDFS_NAMESPACE))
        .map_err(storage_failure)?
        .for_writer(writer);

    for triple in ontology_to_triples(ontology) {
        serializer.serialize_triple(&triple).map_err(storage_failure)?;
    }
    serializer.finish().map_err(storage_failure)
}

pub fn write_ntriples<W: Write>(ontology: &Ontology, writer: W) -> Result<W, ProviderError> {
    let mut serializer = NTriplesSerializer::new().for_writer(writer);

    for triple in ontology_to_triples(ontology) {
        serializer.serialize_triple(&triple).map_err(storage_failure)?;
    }
    Ok(serializer.finish())
}

/// Writes the ontology as RDF/XML, the usual `.owl` file layout.
pub fn write_rdf_xml<W: Write>(ontology: &Ontology, writer: W) -> Result<W, ProviderError> {
    let mut serializer = RdfXmlSerializer::new().for_writer(writer);

    for triple in ontology_to_triples(ontology) {
        serializer.serialize_triple(&triple).map_err(storage_failure)?;
    }
    serializer.finish().map_err(storage_failure)
}
