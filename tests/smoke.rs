// Integration tests for the binary using assert_cmd.
// Each test plays the server side on a local socket and checks what the bot sent back.

use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::Command;
use std::thread;

const BIN: &str = "ant_forager";

fn read_json_line(reader: &mut BufReader<TcpStream>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read from bot");
    assert!(line.ends_with('\n'), "frame without delimiter: {:?}", line);
    serde_json::from_str(line.trim_end()).expect("bot sent invalid JSON")
}

#[test]
fn plays_a_turn_and_reports_disconnect() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("bot connects");
        let mut writer = stream.try_clone().expect("clone stream");
        let mut reader = BufReader::new(stream);

        let login = read_json_line(&mut reader);

        // two messages in one write, the second split in half
        let start = r#"{"type":"gamestart","error":0,"content":{"map":{"cols":8,"rows":8,"hills":[{"col":0,"row":0}]}}}"#;
        let state = r#"{"type":"gamestate","error":0,"content":{"gameobjects":[["a",0,0,0],["f",0,1]]}}"#;
        let (head, tail) = state.split_at(20);
        writer
            .write_all(format!("{}\n{}", start, head).as_bytes())
            .unwrap();
        writer.flush().unwrap();
        thread::sleep(std::time::Duration::from_millis(50));
        writer.write_all(format!("{}\n", tail).as_bytes()).unwrap();
        writer.flush().unwrap();

        let actions = read_json_line(&mut reader);
        (login, actions)
        // dropping the socket ends the game for the bot
    });

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--port",
        &port.to_string(),
        "--token",
        "secret",
        "--seed",
        "42",
        "--quiet",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("Session ended"))
        .stdout(contains("connection closed by server"))
        .stdout(contains("turns=1"));

    let (login, actions) = server.join().expect("server thread");
    assert_eq!(login["type"], "login");
    assert_eq!(login["content"]["token"], "secret");
    assert_eq!(login["content"]["mode"], "training");
    assert_eq!(actions["type"], "gameactions");
    assert_eq!(
        actions["content"]["moves"],
        serde_json::json!([{"col": 0, "row": 0, "dir": "E"}])
    );

    Ok(())
}

#[test]
fn console_stop_ends_the_session() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("bot connects");
        let mut reader = BufReader::new(stream);
        let login = read_json_line(&mut reader);
        // wait for the bot to hang up
        let mut rest = String::new();
        let _ = reader.read_line(&mut rest);
        login
    });

    let mut cmd = assert_cmd::Command::cargo_bin(BIN)?;
    cmd.args(["--port", &port.to_string(), "--mode", "regular", "--quiet"])
        .write_stdin("status\nstop\n");

    cmd.assert()
        .success()
        .stdout(contains("stopped from console"))
        .stdout(contains("turns=0"));

    let login = server.join().expect("server thread");
    assert_eq!(login["content"]["mode"], "regular");

    Ok(())
}

#[test]
fn unreachable_server_fails() -> Result<(), Box<dyn std::error::Error>> {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--port", &port.to_string(), "--quiet"]);

    cmd.assert().failure();

    Ok(())
}
