use std::process::ExitCode;

use agenda_core::cli;
use agenda_core::utils::build_info;

const USAGE: &str = "\
Uso: agenda_cli [--version | --help]

Assistente de agendamento em cinco etapas: data, horário, serviço, dados e resumo.

Variáveis de ambiente:
  AGENDA_HOME   diretório do config.json (padrão ~/.agenda_core)
  AGENDA_SEED   semente fixa para disponibilidade e códigos
  AGENDA_TODAY  data de referência no formato AAAA-MM-DD
  RUST_LOG      filtro de logs (ex.: agenda_core=debug)
  NO_COLOR      desativa cores";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--version" | "-V") => {
            println!("{}", build_info::current().summary());
            return ExitCode::SUCCESS;
        }
        Some("--help" | "-h") => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Some(other) => {
            eprintln!("Error: unknown argument `{other}`\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
        None => {}
    }

    agenda_core::init();
    match cli::run_cli() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
