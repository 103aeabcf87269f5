//! Answer composition.
//!
//! The template strategy formats record fields directly. The grounded
//! strategy serialises the relevant fields into a context block and asks the
//! completion service to phrase the answer. Both always produce a non-empty
//! string; failures become short user-facing messages and the full detail is
//! only logged.

use std::sync::Arc;

use tracing::{debug, warn};

use super::intent::Intent;
use crate::completion::{CompletionRequest, CompletionService};
use crate::config::{AnswerConfig, AnswerStrategy};
use crate::error::{CompletionError, FloraError};
use crate::plant::model::non_blank;
use crate::plant::{Plant, RelationshipKind};

/// Reply for questions that name no plant under the template strategy.
pub const SPECIFY_PLANT: &str = "❓ 请明确指定植物名称（如：兰有什么文化象征？）";

/// Reply for empty or whitespace-only questions.
pub const EMPTY_QUESTION: &str = "⚠️ 请先输入你的问题！";

const GROUNDED_INSTRUCTION: &str = "你是荆楚植物文化知识助手。只能依据用户消息中“已知信息”里的事实作答，\
不得添加已知信息中没有的事实、出处或数据；已知信息不足以回答时，直接说明知识库中暂无相关记载。";

const GENERIC_INSTRUCTION: &str = "你是荆楚植物文化知识助手。知识库中没有找到与问题对应的植物，\
请凭可靠的常识简要回答；不确定时说明不确定，不要编造出处或数据。";

/// Composes the final answer string.
pub struct AnswerComposer {
    strategy: AnswerStrategy,
    delimiter: String,
    max_answer_chars: usize,
    error_excerpt_chars: usize,
    max_tokens: u32,
    completion: Option<Arc<dyn CompletionService>>,
}

impl AnswerComposer {
    /// Create a composer. `completion` is required for useful grounded answers;
    /// without it every grounded call reports a configuration failure.
    pub fn new(config: &AnswerConfig, max_tokens: u32, completion: Option<Arc<dyn CompletionService>>) -> Self {
        Self {
            strategy: config.strategy,
            delimiter: config.delimiter.clone(),
            max_answer_chars: config.max_answer_chars.max(1),
            error_excerpt_chars: config.error_excerpt_chars,
            max_tokens,
            completion,
        }
    }

    /// Offline composer using the template strategy.
    pub fn template(config: &AnswerConfig) -> Self {
        let mut composer = Self::new(config, 0, None);
        composer.strategy = AnswerStrategy::Template;
        composer
    }

    pub fn strategy(&self) -> AnswerStrategy {
        self.strategy
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Compose an answer for a resolved plant, or for no plant at all.
    pub async fn compose(&self, plant: Option<&Plant>, intent: Intent, question: &str) -> String {
        match (self.strategy, plant) {
            (AnswerStrategy::Template, Some(plant)) => self.template_answer(plant, intent),
            (AnswerStrategy::Template, None) => SPECIFY_PLANT.to_string(),
            (AnswerStrategy::Grounded, Some(plant)) => {
                let request = CompletionRequest {
                    system: self.instruction(GROUNDED_INSTRUCTION),
                    context: self.grounding_context(plant, intent),
                    question: question.to_string(),
                    max_tokens: self.max_tokens,
                };
                self.complete(&request)
                    .await
                    .unwrap_or_else(|| self.unavailable(plant, intent))
            }
            (AnswerStrategy::Grounded, None) => {
                let request = CompletionRequest {
                    system: self.instruction(GENERIC_INSTRUCTION),
                    context: String::new(),
                    question: question.to_string(),
                    max_tokens: self.max_tokens,
                };
                self.complete(&request)
                    .await
                    .unwrap_or_else(|| SPECIFY_PLANT.to_string())
            }
        }
    }

    /// Call the completion service. `None` means the model returned only whitespace.
    async fn complete(&self, request: &CompletionRequest) -> Option<String> {
        let Some(service) = self.completion.as_ref() else {
            return Some(self.completion_failure(&CompletionError::NotConfigured));
        };

        debug!(model = service.model(), context_len = request.context.len(), "Requesting completion");
        match service.complete(request).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(model = service.model(), "Completion service returned an empty answer");
                    None
                } else {
                    Some(truncate_chars(text, self.max_answer_chars))
                }
            }
            Err(e) => Some(self.completion_failure(&e)),
        }
    }

    fn instruction(&self, base: &str) -> String {
        format!(
            "{}只使用提问所用的语言作答。回答不超过{}个字。",
            base, self.max_answer_chars
        )
    }

    /// Format an answer straight from the record.
    pub fn template_answer(&self, plant: &Plant, intent: Intent) -> String {
        let name = &plant.name;
        match intent {
            Intent::Taxonomy => self.taxonomy_answer(plant),
            Intent::Basic => self.basic_answer(plant),
            _ => {
                let values = self.intent_values(plant, intent);
                if values.is_empty() {
                    self.unavailable(plant, intent)
                } else {
                    format!(
                        "{} {}的{}：\n{}",
                        icon(intent),
                        name,
                        intent.label(),
                        values.join(&self.delimiter)
                    )
                }
            }
        }
    }

    fn taxonomy_answer(&self, plant: &Plant) -> String {
        let latin = non_blank(plant.latin_name.as_deref());
        let family = non_blank(plant.family.as_deref());
        let genus = non_blank(plant.genus.as_deref());
        if latin.is_none() && family.is_none() && genus.is_none() {
            return self.unavailable(plant, Intent::Taxonomy);
        }

        let mut out = format!("{} {}", icon(Intent::Taxonomy), plant.name);
        if let Some(latin) = latin {
            out.push_str(&format!("（{}）", latin));
        }
        out.push_str(&format!(
            "\n🏷️ 科：{}  属：{}",
            family.unwrap_or("未知"),
            genus.unwrap_or("未知")
        ));
        out
    }

    fn basic_answer(&self, plant: &Plant) -> String {
        let mut lines = Vec::new();
        if let Some(latin) = non_blank(plant.latin_name.as_deref()) {
            lines.push(format!("🌿 {}（{}）", plant.name, latin));
        } else {
            lines.push(format!("🌿 {}", plant.name));
        }
        let family = non_blank(plant.family.as_deref());
        let genus = non_blank(plant.genus.as_deref());
        if family.is_some() || genus.is_some() {
            lines.push(format!(
                "🏷️ 科：{}  属：{}",
                family.unwrap_or("未知"),
                genus.unwrap_or("未知")
            ));
        }
        if let Some(dist) = non_blank(plant.distribution.as_deref()) {
            lines.push(format!("🗺️ 分布：{}", dist));
        }
        let symbols = plant.relationship_values(RelationshipKind::Symbol);
        if !symbols.is_empty() {
            lines.push(format!("✨ 文化象征：{}", symbols.join(&self.delimiter)));
        }

        if lines.len() == 1 {
            return self.unavailable(plant, Intent::Basic);
        }
        lines.join("\n")
    }

    /// Values a single-topic intent reads.
    fn intent_values(&self, plant: &Plant, intent: Intent) -> Vec<String> {
        if let Some(kind) = intent.relationship() {
            return plant.relationship_values(kind);
        }
        let scalar = match intent {
            Intent::Distribution => plant.distribution.as_deref(),
            Intent::FolkUse => plant.folk_use.as_deref(),
            _ => None,
        };
        non_blank(scalar).map(|v| vec![v.to_string()]).unwrap_or_default()
    }

    /// Fixed reply when the relevant data is missing.
    pub fn unavailable(&self, plant: &Plant, intent: Intent) -> String {
        format!("{} {}的{}暂缺。", icon(intent), plant.name, intent.label())
    }

    /// Serialise only the attributes relevant to the intent.
    pub fn grounding_context(&self, plant: &Plant, intent: Intent) -> String {
        let mut lines = vec![format!("名称：{}", plant.name)];
        let mut push = |label: &str, value: Option<&str>| {
            if let Some(v) = non_blank(value) {
                lines.push(format!("{}：{}", label, v));
            }
        };

        match intent {
            Intent::Taxonomy | Intent::Basic => {
                push("拉丁名", plant.latin_name.as_deref());
                push("科", plant.family.as_deref());
                push("属", plant.genus.as_deref());
                if intent == Intent::Basic {
                    push("分布", plant.distribution.as_deref());
                    push("文化象征", plant.cultural_symbol.as_deref());
                }
            }
            Intent::Distribution => push("分布", plant.distribution.as_deref()),
            Intent::FolkUse => push("民俗用途", plant.folk_use.as_deref()),
            Intent::Symbolism | Intent::Medicinal | Intent::Festival | Intent::Literature => {
                let values = self.intent_values(plant, intent);
                if !values.is_empty() {
                    let joined = values.join(&self.delimiter);
                    push(intent.label(), Some(joined.as_str()));
                }
                if intent == Intent::Symbolism {
                    push("生态意义", plant.ecological_meaning.as_deref());
                }
            }
        }
        lines.join("\n")
    }

    /// User-facing message for a store failure.
    pub fn store_failure(&self, error: &FloraError) -> String {
        warn!(error = %error, "Record store failure while answering");
        format!(
            "⚠️ 知识库暂时无法访问：{}",
            truncate_chars(&error.to_string(), self.error_excerpt_chars)
        )
    }

    /// User-facing message for a completion failure.
    pub fn completion_failure(&self, error: &CompletionError) -> String {
        warn!(error = %error, "Completion service failure while answering");
        format!(
            "⚠️ 智能问答出错：{}",
            truncate_chars(&error.to_string(), self.error_excerpt_chars)
        )
    }
}

fn icon(intent: Intent) -> &'static str {
    match intent {
        Intent::Symbolism | Intent::Basic => "🌿",
        Intent::Medicinal => "💊",
        Intent::Distribution => "🗺️",
        Intent::FolkUse => "🏮",
        Intent::Festival => "🎉",
        Intent::Literature => "📖",
        Intent::Taxonomy => "🌱",
    }
}

/// Keep at most `max` characters, the ellipsis marking a cut included.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
