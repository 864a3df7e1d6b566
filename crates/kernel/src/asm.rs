//! Text and binary assembly of kernel bytecode.
//!
//! Binary records are fixed-width and little-endian:
//!
//! ```text
//! u8 opcode | f32 a | f32 b | f32 c | u64 i
//! ```
//!
//! `i` keeps only its low 64 bits. Masks of lattices with more than 64 points
//! are truncated by [`to_bytes`] (with a warning) and rejected by
//! [`to_bytes_strict`].

use crate::bytecode::{Instr, Opcode};
use crate::error::{KernelError, KernelResult};
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::warn;

pub const RECORD_LEN: usize = 21;

/// Characters of the `0x`-prefixed mask kept in a `VMASK` listing line.
const MASK_PREVIEW_LEN: usize = 18;

pub fn to_assembly(code: &[Instr]) -> String {
    code.iter()
        .enumerate()
        .map(|(index, instr)| format!("{:02}: {}", index, describe(instr)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(instr: &Instr) -> String {
    match instr.op {
        Opcode::Init if !instr.i.is_zero() => format!("INIT p={}", instr.i),
        Opcode::Init if instr.b > 0.0 => format!("INIT dim={}", instr.b.trunc() as i64),
        Opcode::VMask => {
            let hex = format!("{:#x}", instr.i);
            let preview: String = hex.chars().take(MASK_PREVIEW_LEN).collect();
            format!("VMASK nbits={} hex={}...", instr.i.bits(), preview)
        }
        // Printed at record precision so decoded code lists identically.
        Opcode::Grad => format!("GRAD eta={}", instr.c as f32),
        op => op.name().to_string(),
    }
}

/// Encode every instruction, truncating wide masks to their low 64 bits.
pub fn to_bytes(code: &[Instr]) -> Vec<u8> {
    let mut out = Vec::with_capacity(code.len() * RECORD_LEN);
    for (index, instr) in code.iter().enumerate() {
        let bits = instr.i.bits();
        if bits > 64 {
            warn!(index, op = %instr.op, bits, "integer operand truncated to 64 bits");
        }
        write_record(&mut out, instr);
    }
    out
}

/// Encode every instruction, failing on any integer operand wider than 64 bits.
pub fn to_bytes_strict(code: &[Instr]) -> KernelResult<Vec<u8>> {
    if let Some((index, instr)) = code.iter().enumerate().find(|(_, i)| i.i.bits() > 64) {
        return Err(KernelError::MaskTooWide {
            index,
            bits: instr.i.bits(),
        });
    }
    Ok(to_bytes(code))
}

pub fn to_hex(code: &[Instr]) -> String {
    hex::encode(to_bytes(code))
}

fn write_record(out: &mut Vec<u8>, instr: &Instr) {
    let low = instr.i.iter_u64_digits().next().unwrap_or(0);
    out.push(instr.op.to_u8());
    out.extend_from_slice(&(instr.a as f32).to_le_bytes());
    out.extend_from_slice(&(instr.b as f32).to_le_bytes());
    out.extend_from_slice(&(instr.c as f32).to_le_bytes());
    out.extend_from_slice(&low.to_le_bytes());
}

pub fn decode(bytes: &[u8]) -> KernelResult<Vec<Instr>> {
    let mut code = Vec::with_capacity(bytes.len() / RECORD_LEN);
    let mut offset = 0;

    while offset < bytes.len() {
        let remaining = bytes.len() - offset;
        if remaining < RECORD_LEN {
            return Err(KernelError::TruncatedRecord {
                offset,
                remaining,
                expected: RECORD_LEN,
            });
        }

        let record = &bytes[offset..offset + RECORD_LEN];
        let op = Opcode::from_u8(record[0]).ok_or(KernelError::UnknownOpcode {
            opcode: record[0],
            offset,
        })?;

        code.push(Instr {
            op,
            a: f64::from(read_f32(record, 1)),
            b: f64::from(read_f32(record, 5)),
            c: f64::from(read_f32(record, 9)),
            i: BigUint::from(read_u64(record, 13)),
        });
        offset += RECORD_LEN;
    }

    Ok(code)
}

pub fn decode_hex(text: &str) -> KernelResult<Vec<Instr>> {
    let bytes = hex::decode(text.trim()).map_err(|e| KernelError::InvalidHex(e.to_string()))?;
    decode(&bytes)
}

fn read_f32(record: &[u8], at: usize) -> f32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&record[at..at + 4]);
    f32::from_le_bytes(buf)
}

fn read_u64(record: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&record[at..at + 8]);
    u64::from_le_bytes(buf)
}
