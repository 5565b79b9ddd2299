// Concurrent dispatch over one shared Manager.
//
// Command schemas are shared; option values live on a per-run copy, so
// parallel invocations of the same command must each see their own values.

use std::sync::{Arc, Mutex};
use std::thread;

use cmdmux::{Command, CommandOption, Manager, ValueType};

#[test]
fn parallel_runs_do_not_share_values() {
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = results.clone();

    let manager = Arc::new(Manager::new());
    manager
        .add_command(
            Command::new("echo")
                .with_options([CommandOption::required("id", ValueType::Integer).unwrap()])
                .unwrap()
                .with_handler(move |_, arguments, cmd| {
                    let id = cmd.option("id")?.to_int()?;
                    anyhow::ensure!(arguments.get("id") == id.to_string(), "value leaked");
                    sink.lock().unwrap().push(id);
                    Ok(())
                }),
        )
        .unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let m = manager.clone();
            thread::spawn(move || {
                let id = i.to_string();
                m.run_tokens(["prog", "echo", "--id", id.as_str()])
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    let mut ids = results.lock().unwrap().clone();
    ids.sort_unstable();
    assert_eq!(ids, (0..16).collect::<Vec<i64>>());
}

#[test]
fn registration_while_dispatching() {
    let manager = Arc::new(Manager::new());
    manager
        .add_command(Command::new("noop").with_handler(|_, _, _| Ok(())))
        .unwrap();

    let writer = {
        let m = manager.clone();
        thread::spawn(move || {
            for i in 0..50 {
                m.add_command(Command::new(format!("cmd{i}"))).unwrap();
            }
        })
    };
    for _ in 0..50 {
        manager.run_tokens(["prog", "noop"]).unwrap();
    }
    writer.join().unwrap();
    assert_eq!(manager.commands().len(), 51);
}
