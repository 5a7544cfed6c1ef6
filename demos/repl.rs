use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use scriptxp::evaluator::{self, Environment};
use scriptxp::parser::parse_program;
use scriptxp::value::Value;

fn main() {
    println!("ScriptXP interactive evaluator");
    println!("Enter programs like: let add = fn(x, y) {{ x + y }}; add(2, 3)");
    println!("Type :help for commands, or Ctrl+C to exit.");
    println!();

    let mut rl = DefaultEditor::new().expect("could not initialize line editor");
    let env = Environment::new();

    loop {
        match rl.readline("scriptxp> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ":help" => {
                        print_help();
                        continue;
                    }
                    ":env" => {
                        print_environment(&env);
                        continue;
                    }
                    ":quit" | ":exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => {}
                }

                match parse_program(line) {
                    Ok(program) => match evaluator::eval(&program, &env) {
                        // `let` yields null; suppress it so definitions stay quiet
                        Ok(Value::Null) => {}
                        Ok(value) => println!("{value}"),
                        Err(error) => println!("ERROR: {error}"),
                    },
                    Err(error) => println!("parse error: {error}"),
                }
            }

            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("Goodbye!");
                break;
            }
            Err(error) => {
                println!("error: {error:?}");
                break;
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :help   - show this help message");
    println!("  :env    - show current bindings");
    println!("  :quit   - exit (also :exit, Ctrl+C, Ctrl+D)");
    println!();
    println!("Language overview:");
    println!("  Literals:    42, \"text\", true, [1, 2, 3], {{\"key\": \"value\"}}");
    println!("  Bindings:    let x = 5;");
    println!("  Functions:   let add = fn(a, b) {{ a + b }}; add(1, 2)");
    println!("  Conditions:  if (x > 0) {{ \"positive\" }} else {{ \"not\" }}");
    println!("  Builtins:    len, first, last, rest, push, puts");
    println!();
}

fn print_environment(env: &Environment) {
    let bindings = env.bindings();

    if bindings.is_empty() {
        println!("No bindings yet.");
        return;
    }

    println!("Bindings ({} total):", bindings.len());
    for (name, value) in bindings {
        println!("  {name} = {value}");
    }
}
