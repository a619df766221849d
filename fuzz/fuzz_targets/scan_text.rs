#![no_main]

use libfuzzer_sys::fuzz_target;
use mathgate::{FunctionArityTable, GrammarScanner};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let functions = FunctionArityTable::default();
        if let Ok(tokens) = mathgate::lexer::tokenize(s, &functions) {
            let mut scanner = GrammarScanner::new(functions);
            let _ = scanner.scan(&tokens);
        }
    }
});
