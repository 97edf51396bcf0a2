//! Shared helpers for CLI tests: the binary under test and a tiny HTTP
//! repository serving canned artifacts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use zip::write::SimpleFileOptions;

#[allow(deprecated)]
pub fn omod_cmd() -> Command {
    Command::cargo_bin("omod").unwrap()
}

/// Serve `routes` over plain HTTP from a background thread; every other
/// path answers 404. Returns the base URL.
pub fn serve(routes: HashMap<String, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut sock) = stream else { continue };
            let mut buf = vec![0u8; 8192];
            let n = sock.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
            let response = match routes.get(&path) {
                Some(body) => {
                    let mut head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    )
                    .into_bytes();
                    head.extend_from_slice(body);
                    head
                }
                None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    .to_vec(),
            };
            let _ = sock.write_all(&response);
        }
    });
    format!("http://{addr}")
}

/// A module archive whose `config.xml` requires `requires`.
pub fn module_archive(requires: &[(&str, &str)]) -> Vec<u8> {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<module>\n<require_modules>\n");
    for (uid, version) in requires {
        xml.push_str(&format!(
            "<require_module version=\"{version}\">{uid}</require_module>\n"
        ));
    }
    xml.push_str("</require_modules>\n</module>\n");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("config.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
