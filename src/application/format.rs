//! Response formatting.
//!
//! Pure functions mapping structured outcomes to user-facing text. No
//! state, no I/O. The locale picks the template set; it never changes
//! what is rendered.
//!
//! Error rendering follows the relay's taxonomy: timeout and usage
//! messages may carry specifics, auth/not-found/generic messages never
//! echo upstream detail.

use crate::domain::Provider;
use crate::ports::{
    Collection, CreatedEntry, Entry, Locale, SentimentReport, WorkspaceError, MAX_BODY_CHARS,
};

use super::commands::UsageError;

/// Greeting for `/start`.
pub fn welcome(locale: Locale) -> &'static str {
    match locale {
        Locale::English => {
            "Welcome! Send me any message and I'll answer with the active AI provider.\n\
             Use /help to see every command."
        }
        Locale::Portuguese => {
            "Bem-vindo! Envie qualquer mensagem e eu respondo com o provedor de IA ativo.\n\
             Use /help para ver todos os comandos."
        }
    }
}

/// Command reference for `/help`.
pub fn help(locale: Locale) -> &'static str {
    match locale {
        Locale::English => {
            "Commands:\n\
             /start - initialize your session\n\
             /help - show this message\n\
             /ai - toggle AI answers on or off\n\
             /provider <name> - switch AI provider\n\
             /dummy - stop consulting any AI\n\
             /sentiment - analyze the sentiment of your next message\n\
             /note <title> - save your next message as a note\n\
             /list - list workspace collections\n\
             /search <query> - search the workspace\n\n\
             Anything else is sent to the active AI provider."
        }
        Locale::Portuguese => {
            "Comandos:\n\
             /start - inicializa sua sessão\n\
             /help - mostra esta mensagem\n\
             /ai - liga ou desliga as respostas de IA\n\
             /provider <nome> - troca o provedor de IA\n\
             /dummy - para de consultar qualquer IA\n\
             /sentiment - analisa o sentimento da sua próxima mensagem\n\
             /note <título> - salva sua próxima mensagem como nota\n\
             /list - lista as coleções do workspace\n\
             /search <busca> - pesquisa o workspace\n\n\
             Qualquer outra mensagem vai para o provedor de IA ativo."
        }
    }
}

/// Confirmation that AI routing is on.
pub fn ai_enabled(locale: Locale, provider: Provider) -> String {
    match locale {
        Locale::English => format!("AI is on. Active provider: {}.", provider.display_name()),
        Locale::Portuguese => format!(
            "IA ativada. Provedor ativo: {}.",
            provider.display_name()
        ),
    }
}

/// Confirmation that AI routing is off.
pub fn ai_disabled(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "AI is off. Use /ai to turn it back on.",
        Locale::Portuguese => "IA desativada. Use /ai para reativar.",
    }
}

/// Confirmation of a provider switch.
pub fn provider_switched(locale: Locale, provider: Provider) -> String {
    match locale {
        Locale::English => format!("Switched to {}.", provider.display_name()),
        Locale::Portuguese => format!("Provedor alterado para {}.", provider.display_name()),
    }
}

/// One `/provider` hint line per selectable provider.
fn provider_hints(locale: Locale) -> String {
    let mut hints = String::new();
    for provider in Provider::selectable() {
        let line = match locale {
            Locale::English => format!(
                "/provider {} - use {}\n",
                provider.keyword(),
                provider.display_name()
            ),
            Locale::Portuguese => format!(
                "/provider {} - usar {}\n",
                provider.keyword(),
                provider.display_name()
            ),
        };
        hints.push_str(&line);
    }
    hints.trim_end().to_string()
}

/// Banner shown when a message arrives in dummy mode.
pub fn dummy_banner(locale: Locale) -> String {
    match locale {
        Locale::English => format!(
            "I cannot respond right now, dummy mode is active.\n\
             Pick a provider to re-enable AI:\n{}",
            provider_hints(locale)
        ),
        Locale::Portuguese => format!(
            "Não posso responder agora, o modo dummy está ativo.\n\
             Escolha um provedor para reativar a IA:\n{}",
            provider_hints(locale)
        ),
    }
}

/// Confirmation on entering dummy mode.
pub fn dummy_entered(locale: Locale) -> String {
    match locale {
        Locale::English => format!(
            "Dummy mode on: no AI will be consulted.\n\
             Pick a provider to leave it:\n{}",
            provider_hints(locale)
        ),
        Locale::Portuguese => format!(
            "Modo dummy ativado: nenhuma IA será consultada.\n\
             Escolha um provedor para sair:\n{}",
            provider_hints(locale)
        ),
    }
}

/// Fixed reply when AI routing is off.
pub fn disabled_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "AI is disabled. Use /ai to enable it.",
        Locale::Portuguese => "A IA está desativada. Use /ai para ativá-la.",
    }
}

/// Unknown provider keyword in `/provider`.
pub fn unknown_provider(locale: Locale, name: &str) -> String {
    match locale {
        Locale::English => format!(
            "I don't know a provider called \"{}\". Available:\n{}",
            name,
            provider_hints(locale)
        ),
        Locale::Portuguese => format!(
            "Não conheço um provedor chamado \"{}\". Disponíveis:\n{}",
            name,
            provider_hints(locale)
        ),
    }
}

/// Prompt after arming a note save.
pub fn note_armed(locale: Locale, title: &str) -> String {
    match locale {
        Locale::English => format!(
            "Saving a note titled \"{}\". Send the content in your next message.",
            title
        ),
        Locale::Portuguese => format!(
            "Salvando uma nota com o título \"{}\". Envie o conteúdo na próxima mensagem.",
            title
        ),
    }
}

/// Prompt after arming sentiment analysis.
pub fn sentiment_armed(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Send the text you want analyzed in your next message.",
        Locale::Portuguese => "Envie o texto que você quer analisar na próxima mensagem.",
    }
}

/// Confirmation of a saved note, with a truncation notice when the body
/// was cut.
pub fn note_saved(locale: Locale, created: &CreatedEntry) -> String {
    let mut reply = match locale {
        Locale::English => format!("Note \"{}\" saved: {}", created.title, created.url),
        Locale::Portuguese => format!("Nota \"{}\" salva: {}", created.title, created.url),
    };
    if created.truncated {
        let notice = match locale {
            Locale::English => format!(
                "\nHeads up: the content was cut at {} characters.",
                MAX_BODY_CHARS
            ),
            Locale::Portuguese => format!(
                "\nAtenção: o conteúdo foi cortado em {} caracteres.",
                MAX_BODY_CHARS
            ),
        };
        reply.push_str(&notice);
    }
    reply
}

/// Workspace collection listing, one line per collection.
pub fn collections(locale: Locale, collections: &[Collection]) -> String {
    if collections.is_empty() {
        return match locale {
            Locale::English => "No collections found.".to_string(),
            Locale::Portuguese => "Nenhuma coleção encontrada.".to_string(),
        };
    }

    let header = match locale {
        Locale::English => "Collections:",
        Locale::Portuguese => "Coleções:",
    };
    let mut reply = header.to_string();
    for collection in collections {
        reply.push_str(&format!("\n- {} ({})", collection.title, collection.id));
    }
    reply
}

/// Search results, one line per entry: title, link, last edited.
pub fn search_results(locale: Locale, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return match locale {
            Locale::English => "Nothing matched your search.".to_string(),
            Locale::Portuguese => "Nada corresponde à sua busca.".to_string(),
        };
    }

    let header = match locale {
        Locale::English => "Results:",
        Locale::Portuguese => "Resultados:",
    };
    let mut reply = header.to_string();
    for entry in entries {
        reply.push_str(&format!(
            "\n- {} - {} (edited {})",
            entry.title,
            entry.url,
            entry.last_edited.format("%Y-%m-%d")
        ));
    }
    reply
}

/// Sentiment report: one line per vendor present in the result.
pub fn sentiment_report(locale: Locale, report: &SentimentReport) -> String {
    if report.is_empty() {
        return match locale {
            Locale::English => "No sentiment verdict came back. Try again.".to_string(),
            Locale::Portuguese => "Nenhum veredito de sentimento retornou. Tente novamente.".to_string(),
        };
    }

    let header = match locale {
        Locale::English => "Sentiment:",
        Locale::Portuguese => "Sentimento:",
    };
    let mut reply = header.to_string();
    for (vendor, verdict) in report {
        reply.push_str(&format!(
            "\n- {}: {} ({:.0}%)",
            vendor,
            verdict.sentiment,
            verdict.confidence * 100.0
        ));
    }
    reply
}

/// Instructive message for a command missing its argument.
pub fn usage(locale: Locale, error: &UsageError) -> String {
    match locale {
        Locale::English => format!(
            "That command needs an argument.\nUsage: {}\nExample: {}",
            error.usage, error.example
        ),
        Locale::Portuguese => format!(
            "Esse comando precisa de um argumento.\nUso: {}\nExemplo: {}",
            error.usage, error.example
        ),
    }
}

/// Distinct message for a timed-out collaborator call.
pub fn timeout(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "The request timed out. Please try again.",
        Locale::Portuguese => "A solicitação expirou. Tente novamente.",
    }
}

/// Credentials/permissions diagnostic. Never echoes upstream detail.
pub fn auth_error(locale: Locale) -> &'static str {
    match locale {
        Locale::English => {
            "The workspace rejected our credentials. Ask the operator to check the \
             integration token and its permissions."
        }
        Locale::Portuguese => {
            "O workspace rejeitou nossas credenciais. Peça ao operador para verificar o \
             token da integração e suas permissões."
        }
    }
}

/// Missing-resource diagnostic, distinct from the auth one.
pub fn not_found_error(locale: Locale) -> &'static str {
    match locale {
        Locale::English => {
            "The workspace couldn't find what we asked for. The configured collection \
             may be wrong or no longer shared with the integration."
        }
        Locale::Portuguese => {
            "O workspace não encontrou o que pedimos. A coleção configurada pode estar \
             errada ou não está mais compartilhada com a integração."
        }
    }
}

/// Generic apology for everything else.
pub fn generic_error(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Sorry, something went wrong. Please try again later.",
        Locale::Portuguese => "Desculpe, algo deu errado. Tente novamente mais tarde.",
    }
}

/// Generic retry message for a failed sentiment pass.
pub fn sentiment_retry(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Sentiment analysis failed. Please try again.",
        Locale::Portuguese => "A análise de sentimento falhou. Tente novamente.",
    }
}

/// Classifies a workspace failure into the taxonomy's user-facing message.
pub fn workspace_error(locale: Locale, error: &WorkspaceError) -> String {
    match error {
        WorkspaceError::Timeout { .. } => timeout(locale).to_string(),
        WorkspaceError::AuthenticationFailed(_) => auth_error(locale).to_string(),
        WorkspaceError::NotFound(_) => not_found_error(locale).to_string(),
        WorkspaceError::Upstream(_) => generic_error(locale).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::VendorSentiment;
    use chrono::{TimeZone, Utc};

    fn created(truncated: bool) -> CreatedEntry {
        CreatedEntry {
            id: "note-1".to_string(),
            url: "https://workspace.local/note-1".to_string(),
            title: "My Title".to_string(),
            truncated,
        }
    }

    #[test]
    fn note_saved_mentions_title_and_link() {
        let reply = note_saved(Locale::English, &created(false));
        assert!(reply.contains("My Title"));
        assert!(reply.contains("https://workspace.local/note-1"));
        assert!(!reply.contains("cut"));
    }

    #[test]
    fn note_saved_adds_truncation_notice() {
        let reply = note_saved(Locale::English, &created(true));
        assert!(reply.contains("2000"));
    }

    #[test]
    fn dummy_banner_lists_selectable_providers() {
        let banner = dummy_banner(Locale::English);
        for provider in Provider::selectable() {
            assert!(banner.contains(provider.display_name()));
            assert!(banner.contains(provider.keyword()));
        }
        assert!(!banner.contains("/provider dummy"));
    }

    #[test]
    fn sentiment_report_renders_only_present_vendors() {
        let mut report = SentimentReport::new();
        report.insert(
            "amazon".to_string(),
            VendorSentiment::new("Positive", 0.91),
        );

        let reply = sentiment_report(Locale::English, &report);
        assert!(reply.contains("amazon: Positive (91%)"));
        assert!(!reply.contains("google"));
    }

    #[test]
    fn empty_results_have_friendly_messages() {
        assert_eq!(
            search_results(Locale::English, &[]),
            "Nothing matched your search."
        );
        assert_eq!(collections(Locale::English, &[]), "No collections found.");
    }

    #[test]
    fn search_results_render_title_link_and_date() {
        let entries = vec![Entry {
            id: "e1".to_string(),
            title: "Roadmap".to_string(),
            url: "https://workspace.local/e1".to_string(),
            last_edited: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }];
        let reply = search_results(Locale::English, &entries);
        assert!(reply.contains("Roadmap"));
        assert!(reply.contains("2024-03-01"));
    }

    #[test]
    fn workspace_errors_never_echo_upstream_detail() {
        let secret = "token ntn_secret_123";
        let auth = workspace_error(
            Locale::English,
            &WorkspaceError::auth(secret),
        );
        let missing = workspace_error(
            Locale::English,
            &WorkspaceError::not_found("database 42 is gone"),
        );
        let other = workspace_error(
            Locale::English,
            &WorkspaceError::upstream("500 stack trace"),
        );

        assert!(!auth.contains("ntn_secret_123"));
        assert!(!missing.contains("database 42"));
        assert!(!other.contains("stack trace"));
        assert_ne!(auth, missing);
    }

    #[test]
    fn usage_includes_example() {
        let error = UsageError {
            usage: "/note <title>",
            example: "/note Meeting minutes",
        };
        let reply = usage(Locale::English, &error);
        assert!(reply.contains("/note <title>"));
        assert!(reply.contains("/note Meeting minutes"));
    }

    #[test]
    fn portuguese_templates_exist_for_core_messages() {
        assert!(disabled_notice(Locale::Portuguese).contains("IA"));
        assert!(timeout(Locale::Portuguese).contains("Tente"));
        assert!(welcome(Locale::Portuguese).contains("Bem-vindo"));
    }
}
