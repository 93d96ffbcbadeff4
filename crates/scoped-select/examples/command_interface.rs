//! Command interface example
//!
//! Drives the quick-select commands against the in-memory host.

use scoped_select::memory::MemoryBuffer;
use scoped_select::{
    BufferHost, BufferId, BufferText, QuickSelect, QuickSelectCommand, Region, ScopeKind,
};
use scoped_select_lang::LanguageConfig;

const SOURCE: &str = "fn outer(value: usize) -> usize {
    let total = value + 1;
    if total > 2 {
        let value = total * value;
        return value;
    }
    value
}
";

fn print_selections(buffer: &MemoryBuffer) {
    for region in buffer.selections() {
        println!("    {} {:?}", region, buffer.slice(region));
    }
}

fn main() {
    let mut buffer = MemoryBuffer::new(BufferId::new(1), SOURCE, LanguageConfig::rust());
    let mut quick_select = QuickSelect::default();

    // Caret on `value` inside the inner block.
    let caret = SOURCE.find("let value").map(|byte| byte + 4).unwrap_or(0);
    buffer.set_selections(vec![Region::caret(caret)]);

    println!("1. Select every `value` in the enclosing block:");
    let result = buffer
        .run(
            &mut quick_select,
            QuickSelectCommand::ScopedQuickSelect {
                scope: ScopeKind::Block,
            },
        )
        .unwrap();
    println!("  {:?}", result);
    print_selections(&buffer);

    println!("\n2. Mark the enclosing function as the scope:");
    buffer.set_selections(vec![Region::caret(caret)]);
    let result = buffer
        .run(
            &mut quick_select,
            QuickSelectCommand::SetScope {
                scope: ScopeKind::Function,
            },
        )
        .unwrap();
    println!("  {:?}", result);

    println!("\n3. Walk through the matches one at a time:");
    loop {
        let result = buffer
            .run(
                &mut quick_select,
                QuickSelectCommand::IncrementalQuickSelect { add: false },
            )
            .unwrap();
        println!("  {:?}", result);
        print_selections(&buffer);
        if buffer.last_status().is_some() {
            break;
        }
    }
    println!("  status: {}", buffer.last_status().unwrap_or_default());

    println!("\n4. Clear the scope:");
    let result = buffer
        .run(&mut quick_select, QuickSelectCommand::ClearScope)
        .unwrap();
    println!("  {:?}", result);
}
