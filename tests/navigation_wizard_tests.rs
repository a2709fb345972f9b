mod navigation_support;

use navigation_support::NavigationTestHarness;
use predicates::str::contains;
use regex::Regex;

/// Menu keys that walk from the date screen to the contact form: pick the
/// second offered day, 09:00 and "Retorno", pressing "Próximo" after each.
const TO_CONTACT_FORM: [&str; 6] = [
    "DOWN,ENTER",
    "END,ENTER",
    "DOWN,DOWN,ENTER",
    "END,ENTER",
    "DOWN,ENTER",
    "END,ENTER",
];

const ANA: [&str; 4] = ["Ana Silva", "ana@x.com", "11999999999", "<BLANK>"];

#[test]
fn scripted_booking_reaches_confirmation() {
    let harness = NavigationTestHarness::new();
    let mut menus = TO_CONTACT_FORM.to_vec();
    menus.push("ENTER");
    let output = harness.run_interactive(&menus, &ANA);

    let stdout = output.stdout;
    assert!(stdout.contains("[1] Data > [ ] Horário"));
    assert!(stdout.contains("Data selecionada: 20 de outubro de 2026, terça-feira"));
    assert!(stdout.contains("Horários disponíveis para Terça-feira, 20 de outubro"));
    assert!(stdout.contains("  Retorno"));
    assert!(stdout.contains("  R$ 180.00"));
    assert!(stdout.contains("  20 de outubro de 2026, terça-feira às 09:00"));
    assert!(stdout.contains("OK: Agendamento realizado com sucesso!"));
    assert!(stdout.contains("Agendamento confirmado!"));
    assert!(stdout.contains("Enviamos um e-mail de confirmação para ana@x.com"));

    let code = Regex::new(r"CÓDIGO DA RESERVA #([A-Z0-9]{6})").unwrap();
    assert!(code.is_match(&stdout), "missing booking code in:\n{stdout}");
}

#[test]
fn next_without_a_date_shows_the_validation_message() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(&["END,ENTER", "ESC"], &[]);

    assert!(output
        .stdout
        .contains("ERRO: Por favor, selecione uma data para continuar."));
    assert!(output.stdout.contains("Agendamento cancelado."));
    assert!(!output.stdout.contains("[x] Data"));
}

#[test]
fn weekend_typed_date_is_refused() {
    let harness = NavigationTestHarness::new();
    // "Outra data..." sits right after the three offered days.
    let output = harness.run_interactive(&["DOWN,DOWN,DOWN,ENTER", "ESC"], &["24/10/2026"]);

    assert!(output
        .stdout
        .contains("Data indisponível para agendamento: 2026-10-24"));
    assert!(output.stdout.contains("Agendamento cancelado."));
}

#[test]
fn invalid_contact_is_explained_beside_each_field() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(
        &TO_CONTACT_FORM,
        &[
            "An",
            "not-an-email",
            "12345",
            "<BLANK>",
            "<KEEP>",
            "<KEEP>",
            "<CANCEL>",
        ],
    );

    let stdout = output.stdout;
    assert!(stdout.contains("Corrija os campos indicados."));
    assert!(stdout.contains("ERRO: Nome deve ter pelo menos 3 caracteres"));
    assert!(stdout.contains("ERRO: Email inválido"));
    assert!(stdout.contains("ERRO: Telefone deve ter pelo menos 10 dígitos"));
    assert!(stdout.contains("E-mail: Email inválido"));
    assert!(stdout.contains("Nome completo * [An]"));
    assert!(stdout.contains("Agendamento cancelado."));
    assert!(!stdout.contains("Resumo do agendamento"));
}

#[test]
fn back_from_the_summary_returns_to_the_contact_form() {
    let harness = NavigationTestHarness::new();
    let mut menus = TO_CONTACT_FORM.to_vec();
    menus.extend(["HOME,ENTER", "ENTER"]);
    let inputs = [
        "Ana Silva",
        "ana@x.com",
        "11999999999",
        "<BLANK>",
        "<KEEP>",
        "<KEEP>",
        "<KEEP>",
        "Primeira consulta",
    ];
    let output = harness.run_interactive(&menus, &inputs);

    assert!(output.stdout.contains("Ex.: seu@email.com"));
    assert!(output.stdout.contains("Nome completo * [Ana Silva]"));
    assert!(output.stdout.contains("Observações (opcional)"));
    assert!(output.stdout.contains("  Observações: Primeira consulta"));
    assert!(output.stdout.contains("Agendamento confirmado!"));
}

#[test]
fn version_flag_prints_build_summary() {
    let harness = NavigationTestHarness::new();
    harness
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(format!("agenda_cli {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn help_flag_lists_environment() {
    let harness = NavigationTestHarness::new();
    harness
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("AGENDA_TODAY"));
}

#[test]
fn malformed_today_override_fails() {
    let harness = NavigationTestHarness::new();
    harness
        .command()
        .env("AGENDA_TODAY", "19/10/2026")
        .env("AGENDA_TEST_MENU_EVENTS", "ESC")
        .assert()
        .failure()
        .stderr(contains("AGENDA_TODAY must be a YYYY-MM-DD date"));
}
