//! Question answering pipeline.
//!
//! question → resolve → classify → fetch → compose → answer string.
//! [`QaService::answer`] is total: every input, including empty strings and
//! store or model failures, yields a non-empty reply.

pub mod catalog;
pub mod composer;
pub mod intent;
pub mod resolver;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AnswerStrategy;
use crate::error::{FloraError, FloraResult};
use crate::plant::model::dedup_values;
use crate::plant::{PlantDetail, RelationshipKind};
use crate::store::{RecordStore, StoreBackend};
use catalog::CatalogQuery;
use composer::{AnswerComposer, EMPTY_QUESTION};
use intent::Intent;
use resolver::{EntityResolver, Resolution};

/// Which path produced an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Empty or whitespace-only question.
    InvalidInput,
    /// A loaded plant was resolved and its record composed.
    Entity { name: String, intent: Intent },
    /// The name was known but the store no longer has the record.
    EntityMissing { name: String },
    /// An alias matched a plant that is not loaded.
    AliasUnresolvable { alias: String, target: String },
    /// A collection-level question answered from the store.
    Catalog,
    /// No plant recognised; generic reply.
    Fallback,
    /// The store could not be queried.
    StoreError,
}

/// An answer and the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub route: Route,
}

impl Answer {
    fn new(text: impl Into<String>, route: Route) -> Self {
        Self {
            text: text.into(),
            route,
        }
    }
}

/// Question answering over one read-only snapshot of plant names.
///
/// The snapshot is taken at construction; build a new service to pick up
/// data changes.
pub struct QaService {
    store: Arc<dyn RecordStore>,
    resolver: EntityResolver,
    composer: AnswerComposer,
}

impl QaService {
    /// Load the name snapshot from the store and build the service.
    pub async fn load(
        store: Arc<dyn RecordStore>,
        aliases: &BTreeMap<String, String>,
        composer: AnswerComposer,
    ) -> FloraResult<Self> {
        let names = store.list_entity_names().await?;
        info!(
            backend = store.backend().as_str(),
            plants = names.len(),
            aliases = aliases.len(),
            strategy = composer.strategy().as_str(),
            "Knowledge snapshot loaded"
        );

        Ok(Self {
            store,
            resolver: EntityResolver::new(names, aliases),
            composer,
        })
    }

    pub fn backend(&self) -> StoreBackend {
        self.store.backend()
    }

    pub fn strategy(&self) -> AnswerStrategy {
        self.composer.strategy()
    }

    /// All canonical plant names in the snapshot.
    pub fn list_entities(&self) -> &[String] {
        self.resolver.names()
    }

    /// A name picked deterministically from `seed` (e.g. the day of the year).
    pub fn featured(&self, seed: u32) -> Option<&str> {
        let names = self.resolver.names();
        if names.is_empty() {
            return None;
        }
        Some(names[seed as usize % names.len()].as_str())
    }

    /// Full record of one plant.
    pub async fn get_entity_detail(&self, name: &str) -> FloraResult<PlantDetail> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FloraError::invalid_input("plant name must not be empty"));
        }
        self.store
            .fetch_entity(name)
            .await?
            .map(PlantDetail::from)
            .ok_or_else(|| FloraError::EntityNotFound(name.to_string()))
    }

    /// Answer a question. Never fails.
    pub async fn answer(&self, question: &str) -> String {
        self.answer_with_route(question).await.text
    }

    /// Answer a question and report which path produced the reply.
    pub async fn answer_with_route(&self, question: &str) -> Answer {
        let question = question.trim();
        if question.is_empty() {
            return Answer::new(EMPTY_QUESTION, Route::InvalidInput);
        }

        let answer = match self.resolver.resolve(question) {
            Resolution::Found(name) => self.answer_for_plant(name, question).await,
            Resolution::AliasUnresolvable { alias, target } => Answer::new(
                format!("❌ 暂未收录该种植物（{}）", alias),
                Route::AliasUnresolvable { alias, target },
            ),
            Resolution::NotFound => self.answer_without_plant(question).await,
        };

        debug!(route = ?answer.route, "Answered question");
        answer
    }

    async fn answer_for_plant(&self, name: String, question: &str) -> Answer {
        let intent = Intent::classify(question);
        debug!(plant = %name, intent = intent.as_str(), "Routing question");

        match self.store.fetch_entity(&name).await {
            Ok(Some(plant)) => {
                let text = self.composer.compose(Some(&plant), intent, question).await;
                Answer::new(text, Route::Entity { name, intent })
            }
            Ok(None) => Answer::new(format!("🌿 {}的信息暂缺。", name), Route::EntityMissing { name }),
            Err(e) => Answer::new(self.composer.store_failure(&e), Route::StoreError),
        }
    }

    async fn answer_without_plant(&self, question: &str) -> Answer {
        if let Some(query) = CatalogQuery::detect(question) {
            match self.catalog_names(&query).await {
                Ok(names) => {
                    if let Some(text) = catalog::render(&query, &names, self.composer.delimiter()) {
                        return Answer::new(text, Route::Catalog);
                    }
                }
                Err(e) => return Answer::new(self.composer.store_failure(&e), Route::StoreError),
            }
        }

        let text = self
            .composer
            .compose(None, Intent::classify(question), question)
            .await;
        Answer::new(text, Route::Fallback)
    }

    async fn catalog_names(&self, query: &CatalogQuery) -> FloraResult<Vec<String>> {
        match query {
            CatalogQuery::AllPlants => Ok(self.resolver.names().to_vec()),
            CatalogQuery::Festival { needle, .. } => {
                self.store
                    .plants_related_to(RelationshipKind::Festival, needle)
                    .await
            }
            CatalogQuery::Literature { needles } => {
                let mut names = Vec::new();
                for needle in needles.iter() {
                    names.extend(
                        self.store
                            .plants_related_to(RelationshipKind::Literature, needle)
                            .await?,
                    );
                }
                Ok(dedup_values(names))
            }
        }
    }

    /// Release the store connection.
    pub async fn close(&self) {
        self.store.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionRequest, CompletionService};
    use crate::config::AnswerConfig;
    use crate::error::CompletionError;
    use crate::plant::Plant;
    use crate::store::TableStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Lists names but fails every record lookup.
    struct UnreachableStore;

    #[async_trait]
    impl RecordStore for UnreachableStore {
        fn backend(&self) -> StoreBackend {
            StoreBackend::Graph
        }

        async fn list_entity_names(&self) -> FloraResult<Vec<String>> {
            Ok(vec!["梅".to_string()])
        }

        async fn fetch_entity(&self, _name: &str) -> FloraResult<Option<Plant>> {
            Err(FloraError::unavailable("connection reset by peer"))
        }

        async fn fetch_relationship(&self, _name: &str, _kind: RelationshipKind) -> FloraResult<Vec<String>> {
            Err(FloraError::unavailable("connection reset by peer"))
        }

        async fn plants_related_to(&self, _kind: RelationshipKind, _needle: &str) -> FloraResult<Vec<String>> {
            Err(FloraError::unavailable("connection reset by peer"))
        }
    }

    struct CountingCompletion {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionService for CountingCompletion {
        fn model(&self) -> &str {
            "counting"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("通用回答：{}", request.question))
        }
    }

    fn plum_store() -> Arc<dyn RecordStore> {
        let mut plum = Plant::named("梅");
        plum.family = Some("蔷薇科".to_string());
        plum.set_relationship(RelationshipKind::Symbol, ["高洁"]);
        Arc::new(TableStore::from_plants(StoreBackend::Fixture, vec![plum]))
    }

    fn plum_aliases() -> BTreeMap<String, String> {
        [("梅花".to_string(), "梅".to_string())].into_iter().collect()
    }

    async fn template_service(store: Arc<dyn RecordStore>) -> QaService {
        let composer = AnswerComposer::template(&AnswerConfig::default());
        QaService::load(store, &plum_aliases(), composer).await.unwrap()
    }

    #[tokio::test]
    async fn test_alias_symbolism_scenario() {
        let qa = template_service(plum_store()).await;
        let answer = qa.answer_with_route("梅花的文化象征？").await;
        assert_eq!(
            answer.route,
            Route::Entity {
                name: "梅".to_string(),
                intent: Intent::Symbolism
            }
        );
        assert!(answer.text.contains("高洁"));
    }

    #[tokio::test]
    async fn test_unknown_plant_uses_grounded_fallback() {
        let completion = Arc::new(CountingCompletion {
            calls: AtomicUsize::new(0),
        });
        let cfg = AnswerConfig {
            strategy: AnswerStrategy::Grounded,
            ..AnswerConfig::default()
        };
        let composer = AnswerComposer::new(&cfg, 128, Some(completion.clone()));
        let qa = QaService::load(plum_store(), &plum_aliases(), composer).await.unwrap();

        let answer = qa.answer_with_route("水仙的文化象征？").await;
        assert_eq!(answer.route, Route::Fallback);
        assert_eq!(answer.text, "通用回答：水仙的文化象征？");
        assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_store_unavailable_is_a_message() {
        let qa = template_service(Arc::new(UnreachableStore)).await;
        let answer = qa.answer_with_route("梅的文化象征？").await;
        assert_eq!(answer.route, Route::StoreError);
        assert!(answer.text.starts_with("⚠️ 知识库暂时无法访问"));
    }

    #[tokio::test]
    async fn test_alias_to_unloaded_plant() {
        let aliases: BTreeMap<String, String> =
            [("水仙花".to_string(), "水仙".to_string())].into_iter().collect();
        let composer = AnswerComposer::template(&AnswerConfig::default());
        let qa = QaService::load(plum_store(), &aliases, composer).await.unwrap();

        let answer = qa.answer_with_route("水仙花的花期").await;
        assert_eq!(answer.text, "❌ 暂未收录该种植物（水仙花）");
        assert!(matches!(answer.route, Route::AliasUnresolvable { .. }));
    }

    #[tokio::test]
    async fn test_answer_is_total() {
        let qa = template_service(plum_store()).await;
        for q in ["", "   ", "\n\t", "hello", "？", "水仙", "梅"] {
            let text = qa.answer(q).await;
            assert!(!text.is_empty(), "empty answer for {:?}", q);
        }
        assert_eq!(qa.answer("  ").await, EMPTY_QUESTION);
        assert_eq!(qa.answer("今天天气如何").await, composer::SPECIFY_PLANT);
    }

    #[tokio::test]
    async fn test_total_even_when_store_is_down() {
        let qa = template_service(Arc::new(UnreachableStore)).await;
        for q in ["", "梅花", "端午节和什么植物有关", "所有植物", "什么都不是"] {
            assert!(!qa.answer(q).await.is_empty());
        }
        let answer = qa.answer_with_route("端午节和什么植物有关").await;
        assert_eq!(answer.route, Route::StoreError);
    }

    #[tokio::test]
    async fn test_catalog_questions() {
        let qa = template_service(Arc::new(crate::store::fixture::fixture_store())).await;

        let all = qa.answer_with_route("知识库里有哪些植物？").await;
        assert_eq!(all.route, Route::Catalog);
        assert!(all.text.contains("共有 6 种植物"));

        let duanwu = qa.answer("端午节和什么植物有关？").await;
        assert!(duanwu.contains("艾"));
        assert!(duanwu.contains("菖蒲"));

        // No plant is related to 清明 in the fixture: nothing is invented.
        let qingming = qa.answer_with_route("清明节相关的植物").await;
        assert_eq!(qingming.route, Route::Fallback);
    }

    #[tokio::test]
    async fn test_detail() {
        let qa = template_service(plum_store()).await;
        let detail = qa.get_entity_detail("梅").await.unwrap();
        assert_eq!(detail.family.as_deref(), Some("蔷薇科"));
        assert_eq!(detail.symbols, vec!["高洁"]);

        assert!(matches!(
            qa.get_entity_detail("水仙").await,
            Err(FloraError::EntityNotFound(_))
        ));
        assert!(matches!(
            qa.get_entity_detail(" ").await,
            Err(FloraError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_featured_is_stable() {
        let qa = template_service(Arc::new(crate::store::fixture::fixture_store())).await;
        let n = qa.list_entities().len() as u32;
        assert_eq!(qa.featured(3), qa.featured(3 + n));
        assert!(qa.featured(0).is_some());
    }
}
