use std::io;

use console::style;
use dialoguer::Input;
use tabular::{row, Table};

use nskube::{Chooser, ConnectionTarget, Registry};

pub fn targets_table(targets: &[ConnectionTarget]) -> Table {
    let mut table = Table::new("{:>}) {:<} {:<} {:<}");
    for (i, target) in targets.iter().enumerate() {
        table.add_row(row!(
            i,
            format!("🖥  {}", target.cluster),
            format!("📁 {}", target.project),
            &target.region
        ));
    }
    table
}

pub fn registry_table(registry: &Registry) -> Table {
    let mut table = Table::new("{:<} {:<} {:<} {:<}");
    table.add_row(row!("NAMESPACE", "CLUSTER", "PROJECT", "REGION"));
    for entry in registry.entries() {
        for (i, target) in entry.targets.iter().enumerate() {
            let name = if i == 0 { entry.name.as_str() } else { "" };
            table.add_row(row!(name, &target.cluster, &target.project, &target.region));
        }
    }
    table
}

/// Lists the candidates on stdout and reads an index from the terminal.
pub struct PromptChooser;

impl Chooser for PromptChooser {
    fn choose(&mut self, namespace: &str, targets: &[ConnectionTarget]) -> io::Result<String> {
        println!(
            "{} exists in more than one cluster, which one do you want to use?",
            style(namespace).bold()
        );
        print!("{}", targets_table(targets));

        Input::<String>::new()
            .with_prompt("Cluster number")
            .allow_empty(true)
            .interact_text()
    }
}
