use colored::*;
use dotenvy::dotenv;
use std::io::{self, Write};

use revisoes_quadriciclos::config::ClientConfig;
use revisoes_quadriciclos::models::NewQuadricycle;
use revisoes_quadriciclos::panel::view::render_tab;
use revisoes_quadriciclos::panel::{Confirm, PanelState, Tab};
use revisoes_quadriciclos::services::DataService;

/// Confirmación por teclado (s/N)
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match read_line(&format!("{} (s/N): ", prompt)) {
            Ok(answer) => matches!(answer.to_lowercase().as_str(), "s" | "sim" | "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("{}", "🏍️ Revisões de Quadriciclos".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let config = ClientConfig::default();
    let service = DataService::from_config(&config)?;
    if service.probe().await {
        println!("{} {}", "✅ Backend conectado:".bright_green(), service.primary_name());
    } else {
        println!(
            "{}",
            "⚠️ Backend indisponível, usando armazenamento local".bright_yellow()
        );
    }

    let mut panel = PanelState::new(service);
    if let Err(e) = panel.refresh().await {
        println!("{} {}", "❌ Erro ao carregar dados:".bright_red(), e);
    }

    loop {
        show_list(&panel);

        println!();
        println!("{}", "📋 MENU PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🔄 Alternar aba (ativos/concluídos)");
        println!("2. ➕ Novo registro");
        println!("3. ✅ Concluir revisão");
        println!("4. 🚫 Recusar revisão");
        println!("5. ↩️ Limpar revisão");
        println!("6. 🏁 Finalizar ciclo");
        println!("7. 🔓 Reabrir ciclo");
        println!("8. 💬 Link de WhatsApp");
        println!("9. 🗑️ Excluir registro");
        println!("r. 🔃 Recarregar");
        println!("0. 🚪 Sair");

        let choice = read_line("Selecione uma opção: ")?;
        let result = match choice.as_str() {
            "1" => {
                let next = match panel.tab() {
                    Tab::Active => Tab::Completed,
                    Tab::Completed => Tab::Active,
                };
                panel.set_tab(next);
                Ok(())
            }
            "2" => register(&mut panel).await,
            "3" => complete_review(&mut panel).await,
            "4" => refuse_review(&mut panel).await,
            "5" => clear_review(&mut panel).await,
            "6" => finalize(&mut panel).await,
            "7" => reopen(&mut panel).await,
            "8" => contact(&panel),
            "9" => delete(&mut panel).await,
            "r" => panel.refresh().await.map_err(Into::into),
            "0" => {
                println!("{}", "👋 Até logo!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opção inválida. Tente novamente.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
        } else if panel.is_degraded() {
            println!(
                "{}",
                "⚠️ Operação salva apenas no armazenamento local".bright_yellow()
            );
        }
    }

    Ok(())
}

fn show_list(panel: &PanelState) {
    let tab = match panel.tab() {
        Tab::Active => "ATIVOS",
        Tab::Completed => "CONCLUÍDOS",
    };
    println!();
    println!(
        "{}",
        format!(
            "🏍️ {} ({} ativos / {} concluídos)",
            tab,
            panel.in_tab(Tab::Active).len(),
            panel.in_tab(Tab::Completed).len()
        )
        .bright_cyan()
        .bold()
    );
    println!("{}", render_tab(panel));
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn read_optional(prompt: &str) -> io::Result<Option<String>> {
    let value = read_line(prompt)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Elegir un vehículo de la pestaña actual por su posición
fn pick_vehicle(panel: &PanelState) -> Result<String, Box<dyn std::error::Error>> {
    let index: usize = read_line("Número do veículo: ")?.parse()?;
    panel
        .visible()
        .get(index.wrapping_sub(1))
        .map(|q| q.id.clone())
        .ok_or_else(|| "Veículo inexistente na aba atual".into())
}

fn pick_review() -> Result<u32, Box<dyn std::error::Error>> {
    Ok(read_line("Número da revisão (1-3): ")?.parse()?)
}

async fn register(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "📝 NOVO REGISTRO DE VEÍCULO".bright_cyan().bold());
    let form = NewQuadricycle {
        model: read_line("Modelo: ")?,
        purchase_date: read_line("Data da compra (AAAA-MM-DD): ")?,
        client_name: read_line("Nome do cliente: ")?,
        whatsapp: read_line("WhatsApp: ")?,
    };
    let quad = panel.register(form).await?;
    println!("{} {}", "✅ Registrado:".bright_green(), quad.id);
    Ok(())
}

async fn complete_review(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    let number = pick_review()?;
    let observation = read_optional("Observação (opcional): ")?;
    let responsible = read_optional("Responsável (opcional): ")?;
    let km = read_optional("Km (opcional): ")?;
    panel
        .complete_review(&id, number, observation, responsible, km)
        .await?;
    Ok(())
}

async fn refuse_review(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    let number = pick_review()?;
    let reason = read_optional("Motivo da recusa (opcional): ")?;
    let responsible = read_optional("Responsável (opcional): ")?;
    panel.refuse_review(&id, number, reason, responsible).await?;
    Ok(())
}

async fn clear_review(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    let number = pick_review()?;
    panel.clear_review(&id, number).await?;
    Ok(())
}

async fn finalize(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    if panel.finalize(&id, &StdinConfirm).await? {
        println!("{}", "🏁 Ciclo finalizado".bright_green());
    }
    Ok(())
}

async fn reopen(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    panel.reopen(&id).await?;
    Ok(())
}

fn contact(panel: &PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    let review = read_optional("Número da revisão (vazio = mensagem geral): ")?
        .map(|n| n.parse::<u32>())
        .transpose()?;
    println!("{}", panel.contact_link(&id, review)?.bright_blue());
    Ok(())
}

async fn delete(panel: &mut PanelState) -> Result<(), Box<dyn std::error::Error>> {
    let id = pick_vehicle(panel)?;
    if panel.delete(&id, &StdinConfirm).await? {
        println!("{}", "🗑️ Registro removido".bright_green());
    }
    Ok(())
}
