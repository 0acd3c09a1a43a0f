//! Paginated table over the JSONPlaceholder photos collection.
//!
//! Run with `cargo run`. Keys: ←/→ pages, home/end first/last, 1-9 jump to a
//! visible page number, s cycles the page size, r refreshes, q quits.

use bubbletea_pagetable::prelude::*;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Photo {
    id: u64,
    title: String,
    url: String,
}

impl Record for Photo {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.title.clone(), self.url.clone()]
    }
}

struct App {
    table: DataTable<Photo>,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let source = HttpSource::new("https://jsonplaceholder.typicode.com/photos");
        let mut table = DataTable::new(
            vec![
                Column::new("#").with_width(6),
                Column::new("Title").with_width(50),
                Column::new("URL"),
            ],
            source,
        );
        let cmd = table.init_cmd();
        (Self { table }, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c = key_msg.key == KeyCode::Char('c')
                && key_msg.modifiers.contains(KeyModifiers::CONTROL);
            if key_msg.key == KeyCode::Char('q') || ctrl_c {
                return Some(quit());
            }
        }
        self.table.update(msg)
    }

    fn view(&self) -> String {
        format!("  JSONPlaceholder photos\n\n{}\n", self.table.view())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::WriteLogger::init(
        log::LevelFilter::Debug,
        simplelog::Config::default(),
        std::fs::File::create("photos-demo.log")?,
    )?;

    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
