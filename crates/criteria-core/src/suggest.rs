//! Suggestion synthesis.
//!
//! Two sources feed the editor: the built-in baseline (`synthesize`), which is
//! deterministic and depends only on the issue and the explicit context, and
//! an external provider whose free-form reply is normalized by
//! `parse_provider_output`. Provider failures fall back to the baseline.

use crate::analyzer::{analyze, GherkinAnalysis};
use crate::formatter::format_scenarios;
use crate::knowledge::{ContextFile, KnowledgeItem};
use crate::parser::{parse_block, GherkinBlock};
use crate::scenario::GherkinScenario;
use crate::tracker::Issue;
use crate::types::{Dialect, KnowledgeCategory, Priority, SuggestionCategory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const FILE_EXCERPT_CHARS: usize = 500;
const KNOWLEDGE_EXCERPT_CHARS: usize = 300;
const RAW_DESCRIPTION_CHARS: usize = 500;

const PROVIDER_CONFIDENCE: f32 = 0.85;
const RAW_CONFIDENCE: f32 = 0.7;

// ---------------------------------------------------------------------------
// Suggestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: SuggestionCategory,
    pub priority: Priority,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_gherkin: Option<GherkinBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gherkin_analysis: Option<GherkinAnalysis>,
}

impl Suggestion {
    fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: SuggestionCategory,
        priority: Priority,
        confidence: f32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            priority,
            confidence,
            suggested_gherkin: None,
            gherkin_analysis: None,
        }
    }

    fn with_gherkin(mut self, gherkin: impl Into<String>) -> Self {
        self.suggested_gherkin = Some(GherkinBlock::Text(gherkin.into()));
        self
    }

    /// Scenarios carried by the suggested Gherkin, each with a fresh id.
    pub fn suggested_scenarios(&self) -> Vec<GherkinScenario> {
        self.suggested_gherkin
            .as_ref()
            .map(parse_block)
            .unwrap_or_default()
    }
}

/// Explicit inputs to synthesis and prompting.
#[derive(Debug, Clone, Default)]
pub struct SuggestionContext {
    pub files: Vec<ContextFile>,
    pub knowledge: Vec<KnowledgeItem>,
}

impl SuggestionContext {
    pub fn new(files: Vec<ContextFile>, knowledge: Vec<KnowledgeItem>) -> Self {
        Self { files, knowledge }
    }

    /// Files that finished processing; the rest are ignored everywhere.
    pub fn ready_files(&self) -> impl Iterator<Item = &ContextFile> {
        self.files.iter().filter(|f| f.is_ready())
    }
}

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

const LOGIN_EXAMPLE: &str = "\
Escenario: Login exitoso con credenciales válidas
  Dado que soy un usuario registrado con email \"usuario@ejemplo.com\"
  Y que mi cuenta está activa
  Y que estoy en la página de login
  Cuando ingreso \"usuario@ejemplo.com\" en el campo email
  Y ingreso mi contraseña correcta
  Y hago clic en el botón \"Iniciar Sesión\"
  Entonces debo ser autenticado exitosamente
  Y debo ser redirigido al dashboard en menos de 3 segundos
  Y debo ver \"Bienvenido, Usuario\" en la barra superior";

const EDGE_CASES_EXAMPLE: &str = "\
Escenario: Intento de login con cuenta bloqueada
  Dado que soy un usuario registrado
  Y que mi cuenta ha sido bloqueada por múltiples intentos fallidos
  Cuando intento iniciar sesión con credenciales correctas
  Entonces debo ver el mensaje \"Tu cuenta está temporalmente bloqueada\"
  Y debo ver un enlace para \"Desbloquear cuenta\"
  Y no debo ser autenticado

Escenario: Timeout de sesión durante el login
  Dado que estoy en la página de login
  Y que hay problemas de conectividad
  Cuando intento iniciar sesión
  Y la respuesta del servidor tarda más de 30 segundos
  Entonces debo ver un mensaje \"Tiempo de espera agotado\"
  Y debo poder reintentar el login";

const FILE_CONTEXT_SCENARIOS: &str = "\
Escenario: Validación según especificaciones del documento
  Dado que tengo los requisitos definidos en la documentación
  Y que el sistema debe cumplir con las especificaciones técnicas
  Cuando ejecuto las validaciones correspondientes
  Entonces todos los criterios documentados deben ser verificados
  Y el sistema debe comportarse según lo especificado

Escenario: Integración con sistemas externos mencionados en documentación
  Dado que existen dependencias externas documentadas
  Y que el sistema debe integrarse con servicios de terceros
  Cuando se ejecuta la integración
  Entonces la comunicación debe ser exitosa
  Y los datos deben transferirse correctamente
  Y debe manejarse cualquier error de conectividad";

/// Built-in suggestions for `issue`, in a fixed order.
///
/// Deterministic for a given issue and context; ids are stable (`1`, `2`,
/// `file-context-1`, `knowledge-<n>`).
pub fn synthesize(issue: &Issue, ctx: &SuggestionContext) -> Vec<Suggestion> {
    let mut out = Vec::new();

    let mut structure = Suggestion::new(
        "1",
        "Mejorar estructura de escenarios Gherkin",
        "Los escenarios actuales siguen la estructura Given-When-Then, pero podrían ser más \
         específicos. Considera agregar más contexto en los pasos 'Given' y ser más preciso en \
         las acciones 'When'.",
        SuggestionCategory::GherkinStructure,
        Priority::High,
        0.9,
    )
    .with_gherkin(LOGIN_EXAMPLE);
    structure.gherkin_analysis = Some(analyze(&issue.acceptance_criteria));
    out.push(structure);

    out.push(
        Suggestion::new(
            "2",
            "Agregar escenarios de casos límite",
            "Faltan escenarios importantes como cuenta bloqueada, sesión expirada, y problemas \
             de conectividad. Estos casos son cruciales para una autenticación robusta.",
            SuggestionCategory::EdgeCases,
            Priority::High,
            0.95,
        )
        .with_gherkin(EDGE_CASES_EXAMPLE),
    );

    if let Some(gherkin) = file_context_gherkin(ctx) {
        out.push(
            Suggestion::new(
                "file-context-1",
                "Escenarios basados en documentación adjunta",
                "Basándome en los archivos proporcionados, he identificado casos de uso \
                 adicionales que deberían incluirse en los criterios de aceptación.",
                SuggestionCategory::AcceptanceCriteria,
                Priority::High,
                0.88,
            )
            .with_gherkin(gherkin),
        );
    }

    for (n, mut s) in knowledge_suggestions(issue, &ctx.knowledge).into_iter().enumerate() {
        s.id = format!("knowledge-{n}");
        out.push(s);
    }

    tracing::debug!(count = out.len(), key = %issue.key, "synthesized baseline suggestions");
    out
}

fn file_context_gherkin(ctx: &SuggestionContext) -> Option<String> {
    let names: Vec<&str> = ctx.ready_files().map(|f| f.name.as_str()).collect();
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "# Escenarios generados basados en archivos: {}\n\n{FILE_CONTEXT_SCENARIOS}",
        names.join(", ")
    ))
}

fn knowledge_suggestions(issue: &Issue, knowledge: &[KnowledgeItem]) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let summary = issue.summary.to_lowercase();
    let in_category = |c: KnowledgeCategory| knowledge.iter().filter(move |k| k.category == c);

    let rule = in_category(KnowledgeCategory::BusinessRules).find(|rule| {
        rule.tags
            .iter()
            .any(|tag| summary.contains(&tag.to_lowercase()))
    });
    if let Some(rule) = rule {
        let excerpt: Vec<String> = rule
            .content
            .lines()
            .take(3)
            .map(|line| format!("    {line}"))
            .collect();
        let gherkin = format!(
            "Escenario: Validación de regla de negocio - {title}\n  \
             Dado que el sistema debe cumplir con \"{title}\"\n  \
             Y que se han definido las siguientes reglas:\n\
             {rules}\n  \
             Cuando se ejecuta la funcionalidad\n  \
             Entonces debe validarse el cumplimiento de estas reglas\n  \
             Y debe mostrarse un mensaje apropiado en caso de incumplimiento",
            title = rule.title,
            rules = excerpt.join("\n"),
        );
        out.push(
            Suggestion::new(
                "",
                format!("Aplicar regla de negocio: {}", rule.title),
                format!(
                    "Basándome en la regla \"{}\" de la base de conocimiento, sugiero incluir \
                     validaciones específicas en los escenarios.",
                    rule.title
                ),
                SuggestionCategory::AcceptanceCriteria,
                Priority::High,
                0.92,
            )
            .with_gherkin(gherkin),
        );
    }

    let template = in_category(KnowledgeCategory::Templates)
        .find(|t| t.title.to_lowercase().contains("error"));
    if let Some(template) = template {
        out.push(
            Suggestion::new(
                "",
                "Aplicar plantilla de manejo de errores",
                format!(
                    "Usando la plantilla \"{}\" de la base de conocimiento para mejorar el \
                     manejo de errores.",
                    template.title
                ),
                SuggestionCategory::GherkinStructure,
                Priority::Medium,
                0.85,
            )
            .with_gherkin(template.content.clone()),
        );
    }

    if let Some(persona) = in_category(KnowledgeCategory::UserPersonas).next() {
        let gherkin = format!(
            "Escenario: Funcionalidad optimizada para {title}\n  \
             Dado que soy un {lower}\n  \
             Y que tengo las características definidas en el perfil de usuario\n  \
             Cuando utilizo la funcionalidad\n  \
             Entonces la experiencia debe estar optimizada para mis necesidades\n  \
             Y debe considerar mis preferencias y limitaciones conocidas",
            title = persona.title,
            lower = persona.title.to_lowercase(),
        );
        out.push(
            Suggestion::new(
                "",
                format!("Escenarios específicos para {}", persona.title),
                format!(
                    "Basándome en el perfil de \"{}\", sugiero escenarios que consideren sus \
                     necesidades específicas.",
                    persona.title
                ),
                SuggestionCategory::UserStoryFormat,
                Priority::Medium,
                0.78,
            )
            .with_gherkin(gherkin),
        );
    }

    out
}

// ---------------------------------------------------------------------------
// Provider prompt
// ---------------------------------------------------------------------------

const SYSTEM_PROMPT: &str = "Eres un experto en análisis de historias de usuario y formato \
Gherkin. Tu tarea es analizar historias de usuario y sugerir mejoras específicas en formato \
Gherkin. Responde siempre en español y proporciona sugerencias prácticas y aplicables.";

const RESPONSE_INSTRUCTIONS: &str = r#"
Por favor, proporciona 3-5 sugerencias específicas para mejorar esta historia de usuario.
Para cada sugerencia, incluye:
1. Un título claro
2. Una descripción de la mejora
3. La categoría (Gherkin Structure, Acceptance Criteria, Edge Cases, Security, Usability)
4. La prioridad (High, Medium, Low)
5. Un ejemplo de Gherkin mejorado si aplica

Formato de respuesta en JSON:
{
  "suggestions": [
    {
      "title": "Título de la sugerencia",
      "description": "Descripción detallada",
      "category": "Categoría",
      "priority": "Prioridad",
      "gherkin": "Ejemplo de Gherkin mejorado (opcional)"
    }
  ]
}
"#;

/// Chat prompt for the external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn build_prompt(issue: &Issue, ctx: &SuggestionContext) -> Prompt {
    let criteria = if issue.acceptance_criteria.is_empty() {
        "No hay criterios definidos".to_string()
    } else {
        format_scenarios(&issue.acceptance_criteria, Dialect::Spanish)
    };

    let mut user = format!(
        "Analiza la siguiente historia de usuario y proporciona sugerencias de mejora:\n\n\
         **Historia de Usuario:**\n{summary}\n\n\
         **Descripción:**\n{description}\n\n\
         **Criterios de Aceptación Actuales:**\n{criteria}\n\n\
         **Información del Issue:**\n\
         - Tipo: {issue_type}\n\
         - Prioridad: {priority}\n\
         - Estado: {status}\n\
         - Story Points: {points}\n",
        summary = issue.summary,
        description = issue.free_text(),
        issue_type = issue.issue_type,
        priority = issue.priority,
        status = issue.status,
        points = issue.story_points,
    );

    let files: Vec<&ContextFile> = ctx.ready_files().collect();
    if !files.is_empty() {
        user.push_str("\n**Archivos de Contexto:**\n");
        for file in files {
            user.push_str(&format!(
                "- {}: {}...\n",
                file.name,
                excerpt(&file.content, FILE_EXCERPT_CHARS)
            ));
        }
    }

    if !ctx.knowledge.is_empty() {
        user.push_str("\n**Base de Conocimiento:**\n");
        for item in &ctx.knowledge {
            user.push_str(&format!(
                "- {} ({}): {}...\n",
                item.title,
                item.category,
                excerpt(&item.content, KNOWLEDGE_EXCERPT_CHARS)
            ));
        }
    }

    user.push_str(RESPONSE_INSTRUCTIONS);

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

// ---------------------------------------------------------------------------
// Provider output
// ---------------------------------------------------------------------------

/// Normalized provider reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutput {
    Structured(Vec<Suggestion>),
    /// Reply was not the expected JSON; kept as a single generic suggestion.
    RawText(Suggestion),
}

impl ProviderOutput {
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            ProviderOutput::Structured(list) => list,
            ProviderOutput::RawText(s) => vec![s],
        }
    }
}

/// One entry of the provider's `suggestions` array. Fields of the wrong JSON
/// type are treated as missing.
#[derive(Debug)]
struct ProviderEntry {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    gherkin: Option<GherkinBlock>,
}

impl ProviderEntry {
    fn from_value(value: &Value) -> Self {
        let text = |field: &str| value.get(field).and_then(Value::as_str).map(str::to_string);
        Self {
            title: text("title"),
            description: text("description"),
            category: text("category"),
            priority: text("priority"),
            gherkin: value
                .get("gherkin")
                .and_then(|g| serde_json::from_value(g.clone()).ok()),
        }
    }
}

fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = match text.get(..7) {
        Some(head) if head.eq_ignore_ascii_case("```json") => &text[7..],
        _ => text.strip_prefix("```").unwrap_or(text),
    };
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn parse_provider_output(raw: &str) -> ProviderOutput {
    match serde_json::from_str::<Value>(strip_fences(raw)) {
        Ok(reply) => {
            let entries = reply
                .get("suggestions")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let suggestions = entries
                .iter()
                .enumerate()
                .filter_map(|(n, entry)| provider_suggestion(n, ProviderEntry::from_value(entry)))
                .collect();
            ProviderOutput::Structured(suggestions)
        }
        Err(err) => {
            tracing::warn!(error = %err, "provider reply is not JSON, keeping raw text");
            let s = Suggestion::new(
                "ai-raw",
                "Sugerencia de IA (formato inesperado)",
                excerpt(raw, RAW_DESCRIPTION_CHARS),
                SuggestionCategory::AcceptanceCriteria,
                Priority::Medium,
                RAW_CONFIDENCE,
            );
            ProviderOutput::RawText(s)
        }
    }
}

fn provider_suggestion(n: usize, entry: ProviderEntry) -> Option<Suggestion> {
    let category = match non_blank(entry.category) {
        Some(c) => match c.parse::<SuggestionCategory>() {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(entry = n, error = %err, "rejecting provider suggestion");
                return None;
            }
        },
        None => SuggestionCategory::AcceptanceCriteria,
    };
    let priority = match non_blank(entry.priority) {
        Some(p) => match p.parse::<Priority>() {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(entry = n, error = %err, "rejecting provider suggestion");
                return None;
            }
        },
        None => Priority::Medium,
    };

    let mut s = Suggestion::new(
        format!("ai-{n}"),
        non_blank(entry.title).unwrap_or_else(|| "Sugerencia sin título".to_string()),
        non_blank(entry.description).unwrap_or_else(|| "Sin descripción".to_string()),
        category,
        priority,
        PROVIDER_CONFIDENCE,
    );
    s.suggested_gherkin = entry.gherkin.filter(|g| !g.is_blank());
    Some(s)
}

/// Provider suggestions when the call succeeded, the baseline otherwise.
pub fn suggestions_or_baseline<E: fmt::Display>(
    result: std::result::Result<ProviderOutput, E>,
    issue: &Issue,
    ctx: &SuggestionContext,
) -> Vec<Suggestion> {
    match result {
        Ok(output) => output.into_suggestions(),
        Err(err) => {
            tracing::warn!(error = %err, "suggestion provider failed, using baseline");
            synthesize(issue, ctx)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileStatus;

    fn issue(summary: &str) -> Issue {
        Issue::new(
            "PROJ-1",
            summary,
            "Escenario: Login\n  Dado que soy un usuario\n  Cuando hago clic\n",
        )
    }

    fn item(title: &str, category: KnowledgeCategory, content: &str, tags: &[&str]) -> KnowledgeItem {
        KnowledgeItem::new("K1", title, category, content).with_tags(tags.iter().copied())
    }

    #[test]
    fn baseline_without_context() {
        let out = synthesize(&issue("Login"), &SuggestionContext::default());
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let analysis = out[0].gherkin_analysis.as_ref().unwrap();
        assert!(!analysis.is_valid_gherkin);
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(out[1].category, SuggestionCategory::EdgeCases);
        assert_eq!(out[1].suggested_scenarios().len(), 2);
    }

    #[test]
    fn baseline_examples_parse_cleanly() {
        let out = synthesize(&issue("Login"), &SuggestionContext::default());
        let login = out[0].suggested_scenarios();
        assert_eq!(login.len(), 1);
        assert_eq!(login[0].given.len(), 3);
        assert_eq!(login[0].when.len(), 3);
        assert_eq!(login[0].then.len(), 3);
        assert!(analyze(&login).is_valid_gherkin);
    }

    #[test]
    fn only_completed_files_count() {
        let mut pending = ContextFile::new("borrador.md", "x");
        pending.status = FileStatus::Processing;
        let ctx = SuggestionContext::new(vec![pending.clone()], vec![]);
        assert_eq!(synthesize(&issue("Login"), &ctx).len(), 2);

        let ctx = SuggestionContext::new(
            vec![pending, ContextFile::new("a.md", "x"), ContextFile::new("b.pdf", "y")],
            vec![],
        );
        let out = synthesize(&issue("Login"), &ctx);
        let file = out.iter().find(|s| s.id == "file-context-1").unwrap();
        let text = file.suggested_gherkin.as_ref().unwrap().to_text();
        assert!(text.starts_with("# Escenarios generados basados en archivos: a.md, b.pdf"));
        assert_eq!(file.suggested_scenarios().len(), 2);
    }

    #[test]
    fn knowledge_suggestions_in_order() {
        let ctx = SuggestionContext::new(
            vec![],
            vec![
                item("Persona Admin", KnowledgeCategory::UserPersonas, "perfil", &[]),
                item("Otra regla", KnowledgeCategory::BusinessRules, "r", &["pagos"]),
                item(
                    "Contraseñas",
                    KnowledgeCategory::BusinessRules,
                    "línea 1\nlínea 2\nlínea 3\nlínea 4",
                    &["LOGIN"],
                ),
                item("Manejo de Errores", KnowledgeCategory::Templates, "Escenario: Error\n  Dado que falla", &[]),
            ],
        );
        let out = synthesize(&issue("Pantalla de login"), &ctx);
        let knowledge: Vec<&Suggestion> =
            out.iter().filter(|s| s.id.starts_with("knowledge-")).collect();
        assert_eq!(knowledge.len(), 3);

        assert_eq!(knowledge[0].id, "knowledge-0");
        assert_eq!(knowledge[0].title, "Aplicar regla de negocio: Contraseñas");
        assert_eq!(knowledge[0].confidence, 0.92);
        let rule_text = knowledge[0].suggested_gherkin.as_ref().unwrap().to_text();
        assert!(rule_text.contains("línea 3"));
        assert!(!rule_text.contains("línea 4"));

        assert_eq!(knowledge[1].category, SuggestionCategory::GherkinStructure);
        assert_eq!(knowledge[1].priority, Priority::Medium);
        assert_eq!(knowledge[2].category, SuggestionCategory::UserStoryFormat);
        assert!(knowledge[2].title.contains("Persona Admin"));
    }

    #[test]
    fn no_rule_when_tags_miss_summary() {
        let ctx = SuggestionContext::new(
            vec![],
            vec![item("Pagos", KnowledgeCategory::BusinessRules, "x", &["factura"])],
        );
        assert_eq!(synthesize(&issue("Login"), &ctx).len(), 2);
    }

    #[test]
    fn prompt_includes_context_excerpts() {
        let long = "a".repeat(800);
        let ctx = SuggestionContext::new(
            vec![ContextFile::new("req.md", long.clone())],
            vec![item("Regla", KnowledgeCategory::BusinessRules, &long, &[])],
        );
        let prompt = build_prompt(&issue("Login"), &ctx);
        assert!(prompt.system.contains("Gherkin"));
        assert!(prompt.user.contains("**Historia de Usuario:**\nLogin"));
        assert!(prompt.user.contains(&format!("- req.md: {}...", "a".repeat(500))));
        assert!(!prompt.user.contains(&"a".repeat(501)));
        assert!(prompt.user.contains("- Regla (business-rules): "));
        assert!(prompt.user.contains("\"suggestions\""));
    }

    #[test]
    fn prompt_without_criteria() {
        let prompt = build_prompt(&Issue::new("P-1", "x", "sin escenarios"), &SuggestionContext::default());
        assert!(prompt.user.contains("No hay criterios definidos"));
        assert!(!prompt.user.contains("Archivos de Contexto"));
    }

    #[test]
    fn structured_output_with_fences_and_defaults() {
        let raw = "```json\n{\"suggestions\": [\
            {\"title\": \"Casos límite\", \"category\": \"Edge Cases\", \"priority\": \"High\", \
             \"gherkin\": \"Escenario: X\\n  Dado que a\"},\
            {\"description\": \"\"}\
        ]}\n```";
        let ProviderOutput::Structured(list) = parse_provider_output(raw) else {
            panic!("expected structured output");
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "ai-0");
        assert_eq!(list[0].category, SuggestionCategory::EdgeCases);
        assert_eq!(list[0].confidence, 0.85);
        assert_eq!(list[0].suggested_scenarios().len(), 1);
        assert_eq!(list[1].title, "Sugerencia sin título");
        assert_eq!(list[1].description, "Sin descripción");
        assert_eq!(list[1].category, SuggestionCategory::AcceptanceCriteria);
        assert_eq!(list[1].priority, Priority::Medium);
        assert_eq!(list[1].suggested_gherkin, None);
    }

    #[test]
    fn unknown_category_or_priority_is_rejected() {
        let raw = r#"{"suggestions": [
            {"title": "a", "category": "Magia"},
            {"title": "b", "priority": "Urgente"},
            {"title": "c", "category": "security", "gherkin": ["Escenario: S", "Dado que x"]}
        ]}"#;
        let list = parse_provider_output(raw).into_suggestions();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "ai-2");
        assert_eq!(list[0].category, SuggestionCategory::Security);
        assert_eq!(list[0].suggested_scenarios().len(), 1);
    }

    #[test]
    fn json_without_suggestion_list_is_empty() {
        for raw in [r#"{"suggestions": null}"#, "[1, 2]", r#""texto""#, "{}"] {
            assert_eq!(parse_provider_output(raw), ProviderOutput::Structured(vec![]), "{raw}");
        }
    }

    #[test]
    fn mistyped_fields_take_defaults() {
        let raw = r#"{"suggestions": [{"title": 7, "description": "d", "gherkin": 3}, "suelta"]}"#;
        let list = parse_provider_output(raw).into_suggestions();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "Sugerencia sin título");
        assert_eq!(list[0].description, "d");
        assert_eq!(list[0].suggested_gherkin, None);
        assert_eq!(list[1].id, "ai-1");
        assert_eq!(list[1].description, "Sin descripción");
    }

    #[test]
    fn non_json_becomes_raw_suggestion() {
        let raw = "Te recomiendo ".repeat(100);
        let ProviderOutput::RawText(s) = parse_provider_output(&raw) else {
            panic!("expected raw output");
        };
        assert_eq!(s.id, "ai-raw");
        assert_eq!(s.title, "Sugerencia de IA (formato inesperado)");
        assert_eq!(s.description.chars().count(), 500);
        assert_eq!(s.confidence, 0.7);
        assert!(s.suggested_gherkin.is_none());
    }

    #[test]
    fn failure_falls_back_to_baseline() {
        let issue = issue("Login");
        let ctx = SuggestionContext::default();
        let out = suggestions_or_baseline::<String>(Err("timeout".into()), &issue, &ctx);
        assert_eq!(out, synthesize(&issue, &ctx));

        let ok = suggestions_or_baseline::<String>(
            Ok(ProviderOutput::Structured(vec![])),
            &issue,
            &ctx,
        );
        assert!(ok.is_empty());
    }

    #[test]
    fn suggestion_json_shape() {
        let out = synthesize(&issue("Login"), &SuggestionContext::default());
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["category"], "Gherkin Structure");
        assert_eq!(json["priority"], "High");
        assert!(json["suggestedGherkin"].is_string());
        assert!(json["gherkinAnalysis"]["isValidGherkin"].is_boolean());
        assert!(serde_json::to_value(&out[1]).unwrap().get("gherkinAnalysis").is_none());
    }
}
