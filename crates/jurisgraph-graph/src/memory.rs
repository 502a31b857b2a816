//! In-memory decision graph
//!
//! Answers the read templates in [`crate::queries`] from a map of decisions,
//! dispatching on `TemplateId`. Writes are recorded but not interpreted; load
//! data with [`MemoryGraph::insert`].

use crate::queries::LIST_SEPARATOR;
use crate::schema::Decision;
use async_trait::async_trait;
use jurisgraph_domain::traits::{Bindings, GraphError, GraphRow, GraphStore, QueryTemplate, TemplateId};
use jurisgraph_domain::EntityKey;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

/// Maximum path length answered by the relation template
pub const MAX_HOPS: usize = 3;

/// In-memory graph store
#[derive(Debug)]
pub struct MemoryGraph {
    decisions: RwLock<BTreeMap<String, Decision>>,
    writes: Mutex<Vec<String>>,
    available: AtomicBool,
    stalled: RwLock<HashSet<String>>,
    stall: Duration,
    reads: AtomicUsize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Node {
    Decision(String),
    Topic(u32),
    Article(String),
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    /// Create an empty, available graph
    pub fn new() -> Self {
        Self {
            decisions: RwLock::new(BTreeMap::new()),
            writes: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            stalled: RwLock::new(HashSet::new()),
            stall: Duration::from_secs(60),
            reads: AtomicUsize::new(0),
        }
    }

    /// Create a graph preloaded with decisions
    pub fn with_decisions(decisions: impl IntoIterator<Item = Decision>) -> Self {
        let graph = Self::new();
        for decision in decisions {
            graph.insert(decision);
        }
        graph
    }

    /// How long stalled reads sleep before answering
    pub fn with_stall(mut self, stall: Duration) -> Self {
        self.stall = stall;
        self
    }

    /// Add or replace a decision
    pub fn insert(&self, decision: Decision) {
        let key = normalize(&decision.docket);
        if let Ok(mut decisions) = self.decisions.write() {
            decisions.insert(key, decision);
        }
    }

    /// Number of decisions
    pub fn len(&self) -> usize {
        self.decisions.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Whether the graph holds no decisions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every call fail with `GraphError::Unavailable`, or recover
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make reads bound to this entity hang for the stall duration
    pub fn stall_entity(&self, entity: &str) {
        if let Ok(mut stalled) = self.stalled.write() {
            stalled.insert(normalize(entity));
        }
    }

    /// Statements received through `run_write`
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Number of reads served
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<(), GraphError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GraphError::Unavailable("memory graph offline".to_string()))
        }
    }

    fn is_stalled(&self, bindings: &Bindings) -> bool {
        let Some(entity) = bindings.get("entity") else {
            return false;
        };
        self.stalled
            .read()
            .map(|s| s.contains(&normalize(entity)))
            .unwrap_or(false)
    }

    fn answer(&self, id: TemplateId, bindings: &Bindings) -> Result<Vec<GraphRow>, GraphError> {
        let decisions = self
            .decisions
            .read()
            .map_err(|_| GraphError::Unavailable("memory graph lock poisoned".to_string()))?;

        let entity = bindings.get("entity").map(|e| e.to_uppercase());
        let matching = |key: &str| entity.as_deref().is_some_and(|e| docket_matches(key, e));
        let required = |name: &str| {
            bindings
                .get(name)
                .ok_or_else(|| GraphError::Query(format!("missing binding ${}", name)))
        };

        let rows = match id {
            TemplateId::Attribution => {
                required("entity")?;
                decisions
                    .iter()
                    .filter(|(key, d)| matching(key.as_str()) && !d.rapporteur.is_empty())
                    .map(|(key, d)| GraphRow::new().with("entity", key.as_str()).with("value", d.rapporteur.as_str()))
                    .collect()
            }
            TemplateId::Topic => {
                required("entity")?;
                decisions
                    .iter()
                    .filter(|(key, _)| matching(key.as_str()))
                    .flat_map(|(key, d)| {
                        d.topics.iter().map(move |t| {
                            GraphRow::new().with("entity", key.as_str()).with("value", t.description.as_str())
                        })
                    })
                    .collect()
            }
            TemplateId::Citation => {
                required("entity")?;
                decisions
                    .iter()
                    .filter(|(key, _)| matching(key.as_str()))
                    .flat_map(|(key, d)| {
                        d.articles.iter().map(move |a| {
                            GraphRow::new().with("entity", key.as_str()).with("value", a.article.as_str())
                        })
                    })
                    .collect()
            }
            TemplateId::EntityExists => {
                required("entity")?;
                let mut known: BTreeSet<String> = decisions.keys().cloned().collect();
                known.extend(decisions.values().flat_map(|d| d.precedents.iter().map(|p| normalize(p))));
                known
                    .into_iter()
                    .filter(|key| matching(key.as_str()))
                    .take(1)
                    .map(|key| GraphRow::new().with("entity", key))
                    .collect()
            }
            TemplateId::Relation => {
                let source = required("entity")?.to_uppercase();
                let target = required("target")?.to_uppercase();
                shortest_relation(&decisions, &source, &target)
                    .map(|(from, to, hops)| {
                        vec![GraphRow::new()
                            .with("entity", from)
                            .with("target", to)
                            .with("hops", hops.to_string())]
                    })
                    .unwrap_or_default()
            }
            TemplateId::TopicIndex => decisions
                .iter()
                .flat_map(|(key, d)| {
                    d.topics.iter().map(move |t| {
                        GraphRow::new().with("entity", key.as_str()).with("value", t.description.as_str())
                    })
                })
                .collect(),
            TemplateId::DecisionDigest => decisions
                .iter()
                .map(|(key, d)| {
                    GraphRow::new()
                        .with("entity", key.as_str())
                        .with("class", d.class.as_str())
                        .with("judged_on", d.judged_on.as_str())
                        .with("rapporteur", d.rapporteur.as_str())
                        .with("topics", join(d.topics.iter().map(|t| t.description.as_str())))
                        .with("articles", join(d.articles.iter().map(|a| a.article.as_str())))
                        .with("precedents", join(d.precedents.iter().map(String::as_str)))
                })
                .collect(),
            TemplateId::Ping => vec![GraphRow::new().with("ok", "1")],
        };

        Ok(rows)
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn run_read(
        &self,
        template: &QueryTemplate,
        bindings: &Bindings,
    ) -> Result<Vec<GraphRow>, GraphError> {
        self.ensure_available()?;
        if self.is_stalled(bindings) {
            tokio::time::sleep(self.stall).await;
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.answer(template.id, bindings)
    }

    async fn run_write(&self, statement: &str, _bindings: &Bindings) -> Result<(), GraphError> {
        self.ensure_available()?;
        self.writes
            .lock()
            .map_err(|_| GraphError::Unavailable("memory graph lock poisoned".to_string()))?
            .push(statement.to_string());
        Ok(())
    }
}

fn normalize(docket: &str) -> String {
    EntityKey::parse(docket)
        .map(|k| k.as_str().to_string())
        .unwrap_or_else(|_| docket.trim().to_uppercase())
}

/// Whether a stored key answers a bound docket: equal, or equal up to a `/UF` suffix
fn docket_matches(stored: &str, bound: &str) -> bool {
    stored
        .strip_prefix(bound)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

// Breadth-first search over decisions, topics and articles, ignoring rapporteurs
fn shortest_relation(
    decisions: &BTreeMap<String, Decision>,
    source: &str,
    target: &str,
) -> Option<(String, String, usize)> {
    let mut adjacency: HashMap<Node, Vec<Node>> = HashMap::new();
    let mut link = |a: Node, b: Node| {
        adjacency.entry(a.clone()).or_default().push(b.clone());
        adjacency.entry(b).or_default().push(a);
    };

    for (key, d) in decisions {
        let node = Node::Decision(key.clone());
        for t in &d.topics {
            link(node.clone(), Node::Topic(t.number));
        }
        for a in &d.articles {
            link(node.clone(), Node::Article(a.article.clone()));
        }
        for p in &d.precedents {
            link(node.clone(), Node::Decision(normalize(p)));
        }
    }

    let mut best: Option<(String, String, usize)> = None;
    let starts: Vec<String> = adjacency
        .keys()
        .filter_map(|n| match n {
            Node::Decision(k) if docket_matches(k, source) => Some(k.clone()),
            _ => None,
        })
        .collect();

    for start in starts {
        let origin = Node::Decision(start.clone());
        let mut seen: HashSet<Node> = HashSet::from([origin.clone()]);
        let mut queue = VecDeque::from([(origin, 0usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= MAX_HOPS {
                continue;
            }
            for next in adjacency.get(&node).into_iter().flatten() {
                if !seen.insert(next.clone()) {
                    continue;
                }
                let hops = depth + 1;
                if let Node::Decision(k) = next {
                    if k != &start && docket_matches(k, target) && best.as_ref().is_none_or(|b| hops < b.2) {
                        best = Some((start.clone(), k.clone(), hops));
                    }
                }
                queue.push_back((next.clone(), hops));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries;

    fn entity(key: &str) -> Bindings {
        Bindings::from([("entity".to_string(), key.to_string())])
    }

    fn graph() -> MemoryGraph {
        MemoryGraph::with_decisions([
            Decision::new("HC 161.450", "HC")
                .with_rapporteur("Gilmar Mendes")
                .with_topic(506, "Porte de drogas para consumo próprio")
                .with_article("art. 5º")
                .with_precedent("RE 635.659"),
            Decision::new("RE 635.659", "RE").with_topic(506, "Porte de drogas para consumo próprio"),
            Decision::new("ADI 4.983", "ADI").with_article("art. 225"),
        ])
    }

    #[tokio::test]
    async fn test_direct_lookups() {
        let g = graph();
        let rows = g.run_read(&queries::ATTRIBUTION, &entity("HC 161.450")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("value"), Some("Gilmar Mendes"));

        let rows = g.run_read(&queries::CITATION, &entity("ADI 4.983")).await.unwrap();
        assert_eq!(rows[0].get("value"), Some("art. 225"));

        let rows = g.run_read(&queries::ATTRIBUTION, &entity("HC 999")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_relation_hops() {
        let g = graph();
        let mut b = entity("HC 161.450");
        b.insert("target".to_string(), "RE 635.659".to_string());
        let rows = g.run_read(&queries::RELATION, &b).await.unwrap();
        assert_eq!(rows[0].get("hops"), Some("1"));

        let mut b = entity("HC 161.450");
        b.insert("target".to_string(), "ADI 4.983".to_string());
        assert!(g.run_read(&queries::RELATION, &b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_is_an_error_not_empty() {
        let g = graph();
        g.set_available(false);
        let err = g.run_read(&queries::TOPIC, &entity("HC 161.450")).await.unwrap_err();
        assert!(matches!(err, GraphError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_binding_is_query_error() {
        let g = graph();
        let err = g.run_read(&queries::TOPIC, &Bindings::new()).await.unwrap_err();
        assert!(matches!(err, GraphError::Query(_)));
    }

    #[tokio::test]
    async fn test_docket_binding_is_exact() {
        let g = MemoryGraph::with_decisions([
            Decision::new("ARE 635.659", "ARE").with_rapporteur("Gilmar Mendes"),
            Decision::new("HC 161.450", "HC").with_rapporteur("Gilmar Mendes"),
            Decision::new("RE 1.513.210/SP", "RE").with_rapporteur("Cármen Lúcia"),
        ]);
        assert!(g.run_read(&queries::ATTRIBUTION, &entity("RE 635.659")).await.unwrap().is_empty());
        assert!(g.run_read(&queries::ATTRIBUTION, &entity("HC 16")).await.unwrap().is_empty());
        assert!(g.run_read(&queries::ENTITY_EXISTS, &entity("RE 635.659")).await.unwrap().is_empty());

        let rows = g.run_read(&queries::ATTRIBUTION, &entity("RE 1.513.210")).await.unwrap();
        assert_eq!(rows[0].get("value"), Some("Cármen Lúcia"));
    }

    #[test]
    fn test_docket_matches() {
        assert!(docket_matches("HC 161.450", "HC 161.450"));
        assert!(docket_matches("RE 1.513.210/SP", "RE 1.513.210"));
        assert!(!docket_matches("ARE 635.659", "RE 635.659"));
        assert!(!docket_matches("HC 161.450", "HC 16"));
        assert!(!docket_matches("HC 161.450", "HC 161.45"));
    }

    #[tokio::test]
    async fn test_precedent_stub_exists() {
        let g = MemoryGraph::with_decisions([Decision::new("HC 1", "HC").with_precedent("RE 2")]);
        let rows = g.run_read(&queries::ENTITY_EXISTS, &entity("RE 2")).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
