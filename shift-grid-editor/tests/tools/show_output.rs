use shift_grid_editor::domain::grid_view::GridView;

pub fn show_grid_view_debug_data(view: &GridView) {
    println!("\n=======================================================");
    println!("🗓️ [DEBUG] シフト表 {} (計 {} 日)", view.month_label, view.row_count());
    println!("=======================================================");

    if let Some(message) = view.placeholder {
        println!("   {}", message);
        return;
    }

    println!("   {}", view.header.join(" | "));
    for row in &view.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|c| {
                let value = if c.value.is_empty() { "--" } else { c.value.as_str() };
                if c.selected {
                    format!("[{}]", value)
                } else {
                    value.to_string()
                }
            })
            .collect();
        println!("   {:>2} ({:?}) : {}", row.day, row.kind, cells.join(" | "));
    }
    println!("=======================================================\n");
}
