// crates/golomb-cli/tests/cli_roundtrip.rs

use std::fs;
use std::path::Path;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_golomb")
}

fn run_ok(cmd: &mut Command) {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

fn lcg_next(x: &mut u64) -> u64 {
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

/// 4096 bytes (a whole number of elements for every width): random bytes
/// with stretches of zeros and of 0xFF so small, large and overflow-range
/// values all occur in every format.
fn sample_input() -> Vec<u8> {
    let mut seed = 0x00c0_ffee_0b0e_cafeu64;
    let mut out = Vec::with_capacity(4096);
    for chunk in 0..16 {
        for _ in 0..256 {
            out.push(match chunk % 4 {
                0 => 0x00,
                1 => 0xFF,
                _ => (lcg_next(&mut seed) >> 32) as u8,
            });
        }
    }
    out
}

fn roundtrip(dir: &Path, input: &Path, format: &str, k: u32, adaptive: Option<u32>) {
    let tag = format!("{}_{}_{:?}", format, k, adaptive);
    let packed = dir.join(format!("{tag}.golomb"));
    let unpacked = dir.join(format!("{tag}.out"));

    let mut enc = Command::new(bin());
    enc.args([
        "encode",
        "--format",
        format,
        "-k",
        &k.to_string(),
        input.to_str().unwrap(),
        packed.to_str().unwrap(),
    ]);
    if let Some(a) = adaptive {
        enc.args(["-a", &a.to_string()]);
    }
    run_ok(&mut enc);

    let mut dec = Command::new(bin());
    dec.args([
        "decode",
        "--format",
        format,
        "-k",
        &k.to_string(),
        packed.to_str().unwrap(),
        unpacked.to_str().unwrap(),
    ]);
    if let Some(a) = adaptive {
        dec.args(["-a", &a.to_string()]);
    }
    run_ok(&mut dec);

    let orig = fs::read(input).expect("read input");
    let got = fs::read(&unpacked).expect("read decoded");
    assert_eq!(orig, got, "roundtrip differs for {tag}");
}

#[test]
fn roundtrip_every_format_fixed_and_adaptive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("sample.bin");
    fs::write(&input, sample_input()).expect("write input");

    for format in ["u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64"] {
        roundtrip(dir.path(), &input, format, 3, None);
        roundtrip(dir.path(), &input, format, 3, Some(2));
    }
}

#[test]
fn encode_is_deterministic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("sample.bin");
    fs::write(&input, sample_input()).expect("write input");

    let a = dir.path().join("a.golomb");
    let b = dir.path().join("b.golomb");
    for out in [&a, &b] {
        let mut enc = Command::new(bin());
        enc.args([
            "encode",
            "--format",
            "u16",
            "-k",
            "1",
            input.to_str().unwrap(),
            out.to_str().unwrap(),
        ]);
        run_ok(&mut enc);
    }

    assert_eq!(
        fs::read(&a).unwrap(),
        fs::read(&b).unwrap(),
        "identical runs produced different streams"
    );
}

#[test]
fn stdout_stream_matches_file_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("sample.bin");
    fs::write(&input, sample_input()).expect("write input");

    let to_file = dir.path().join("file.golomb");
    let mut enc = Command::new(bin());
    enc.args([
        "encode",
        "--format",
        "u8",
        input.to_str().unwrap(),
        to_file.to_str().unwrap(),
    ]);
    run_ok(&mut enc);

    let out = Command::new(bin())
        .args(["encode", "--format", "u8", input.to_str().unwrap(), "-"])
        .output()
        .expect("spawn command");
    assert!(out.status.success());

    assert_eq!(out.stdout, fs::read(&to_file).unwrap());
}

#[test]
fn rejects_order_wider_than_elements() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("sample.bin");
    fs::write(&input, sample_input()).expect("write input");

    let out = Command::new(bin())
        .args([
            "encode",
            "--format",
            "u8",
            "-k",
            "8",
            input.to_str().unwrap(),
            dir.path().join("never.golomb").to_str().unwrap(),
        ])
        .output()
        .expect("spawn command");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("order"), "unexpected stderr: {stderr}");
}

#[test]
fn truncated_stream_fails_decode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("maxed.bin");
    // Four u32::MAX elements: with k=0 each becomes a 65 bit overflow code.
    fs::write(&input, [0xFFu8; 16]).expect("write input");

    let packed = dir.path().join("whole.golomb");
    let mut enc = Command::new(bin());
    enc.args([
        "encode",
        "--format",
        "u32",
        input.to_str().unwrap(),
        packed.to_str().unwrap(),
    ]);
    run_ok(&mut enc);

    // 40 bits is past the first code-word's separator but short of its
    // payload, so the cut always lands inside a symbol.
    let whole = fs::read(&packed).unwrap();
    assert_eq!(whole.len(), 33);
    let cut = dir.path().join("cut.golomb");
    fs::write(&cut, &whole[..5]).unwrap();

    let out = Command::new(bin())
        .args([
            "decode",
            "--format",
            "u32",
            cut.to_str().unwrap(),
            dir.path().join("cut.out").to_str().unwrap(),
        ])
        .output()
        .expect("spawn command");

    assert!(!out.status.success(), "decode of a truncated stream succeeded");
}
