//! The `eth_getBlockByHash` wire format: quantities and hashes arrive as
//! `0x`-prefixed hex strings and are decoded into the native header type.

use ember_chain_core::header::Header;
use ember_hashes::Hash;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize, Debug)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<WireHeader>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireHeader {
    parent_hash: String,
    number: String,
    state_root: String,
    transactions_root: String,
    receipts_root: String,
    timestamp: String,
}

fn parse_quantity(value: &str) -> Result<u64, String> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(digits, 16).map_err(|err| format!("bad quantity {value:?}: {err}"))
}

fn parse_hash(value: &str) -> Result<Hash, String> {
    Hash::from_str(value).map_err(|err| format!("bad hash {value:?}: {err}"))
}

impl TryFrom<WireHeader> for Header {
    type Error = String;

    fn try_from(wire: WireHeader) -> Result<Self, Self::Error> {
        Ok(Header {
            parent_hash: parse_hash(&wire.parent_hash)?,
            number: parse_quantity(&wire.number)?,
            state_root: parse_hash(&wire.state_root)?,
            transactions_root: parse_hash(&wire.transactions_root)?,
            receipts_root: parse_hash(&wire.receipts_root)?,
            timestamp: parse_quantity(&wire.timestamp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_header_decoding() {
        let raw = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "parentHash": "0x0101010101010101010101010101010101010101010101010101010101010101",
                "number": "0x1b4",
                "stateRoot": "0x0202020202020202020202020202020202020202020202020202020202020202",
                "transactionsRoot": "0x0303030303030303030303030303030303030303030303030303030303030303",
                "receiptsRoot": "0x0404040404040404040404040404040404040404040404040404040404040404",
                "timestamp": "0x6553f100",
                "extraneousField": "0xdead"
            }
        }"#;
        let response: RpcResponse = serde_json::from_str(raw).unwrap();
        let header = Header::try_from(response.result.unwrap()).unwrap();
        assert_eq!(header.number, 436);
        assert_eq!(header.parent_hash, Hash::from_bytes([1; 32]));
        assert_eq!(header.timestamp, 0x6553f100);
    }

    #[test]
    fn test_null_result_and_error_object() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null,"error":{"code":-32000,"message":"missing"}}"#)
                .unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_bad_quantity_is_rejected() {
        let wire = WireHeader {
            parent_hash: "0x0101010101010101010101010101010101010101010101010101010101010101".into(),
            number: "0xzz".into(),
            state_root: "0x0202020202020202020202020202020202020202020202020202020202020202".into(),
            transactions_root: "0x0303030303030303030303030303030303030303030303030303030303030303".into(),
            receipts_root: "0x0404040404040404040404040404040404040404040404040404040404040404".into(),
            timestamp: "0x0".into(),
        };
        assert!(Header::try_from(wire).is_err());
    }
}
