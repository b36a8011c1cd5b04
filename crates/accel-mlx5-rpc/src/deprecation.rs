/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

// src/deprecation.rs
// Table of parameter keys retired by newer revisions of the
// mlx5_scan_accel_module RPC, and the notices raised when one is used.

use std::fmt;

use crate::client::ParamMap;
use crate::params::BuiltParams;

// Polarity describes how the value of a deprecated key relates to the
// value of its canonical replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    // Same meaning under a new name; the value carries over as is.
    Same,
    // The old key enabled a feature and the new one disables a related
    // feature. The values are not interchangeable.
    Inverted,
    // The relationship between the keys is not known to be equivalent.
    Unconfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedParam {
    pub deprecated: &'static str,
    pub canonical: &'static str,
    pub polarity: Polarity,
    // accepted_as_input is true when ScanAccelModuleParams still exposes
    // the deprecated key as a field.
    pub accepted_as_input: bool,
}

// MERGE is the only deprecated key ScanAccelModuleParams still accepts.
pub const MERGE: DeprecatedParam = DeprecatedParam {
    deprecated: "merge",
    canonical: "enable_driver",
    polarity: Polarity::Same,
    accepted_as_input: true,
};

pub const DEPRECATED_PARAMS: &[DeprecatedParam] = &[
    MERGE,
    DeprecatedParam {
        deprecated: "split_mb_blocks",
        canonical: "crypto_split_blocks",
        polarity: Polarity::Same,
        accepted_as_input: false,
    },
    DeprecatedParam {
        deprecated: "allowed_crypto_devs",
        canonical: "allowed_devs",
        polarity: Polarity::Same,
        accepted_as_input: false,
    },
    DeprecatedParam {
        deprecated: "siglast",
        canonical: "disable_signature",
        polarity: Polarity::Unconfirmed,
        accepted_as_input: false,
    },
    DeprecatedParam {
        deprecated: "enable_crc",
        canonical: "disable_crypto",
        polarity: Polarity::Inverted,
        accepted_as_input: false,
    },
];

pub fn lookup(deprecated: &str) -> Option<&'static DeprecatedParam> {
    DEPRECATED_PARAMS.iter().find(|p| p.deprecated == deprecated)
}

/// Advisory notice raised when a caller uses a deprecated parameter.
///
/// `renamed` is true when the value was moved to the canonical key. A notice
/// with `renamed == false` means the deprecated key was left untouched and
/// needs a manual decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub param: &'static DeprecatedParam,
    pub renamed: bool,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DeprecatedParam {
            deprecated,
            canonical,
            polarity,
            ..
        } = self.param;
        if self.renamed {
            write!(
                f,
                "\"{deprecated}\" is deprecated and will be removed in a future release, use \"{canonical}\" instead"
            )
        } else {
            match polarity {
                Polarity::Inverted => write!(
                    f,
                    "\"{deprecated}\" is deprecated; \"{canonical}\" has inverted meaning and was not set, review manually"
                ),
                _ => write!(
                    f,
                    "\"{deprecated}\" is deprecated; its equivalence to \"{canonical}\" is unconfirmed and it was passed through unchanged"
                ),
            }
        }
    }
}

// emit writes every notice to the diagnostic stream. Kept apart from the
// mapping construction so that stays pure.
pub fn emit(method: &str, notices: &[DeprecationNotice]) {
    for notice in notices {
        tracing::warn!(
            method,
            deprecated = notice.param.deprecated,
            canonical = notice.param.canonical,
            "{notice}"
        );
    }
}

/// Rewrites a parameter mapping written against an older protocol revision.
///
/// Keys with [`Polarity::Same`] are moved to their canonical name unless the
/// canonical key is already present, in which case the canonical value is
/// kept and the deprecated entry is dropped. Keys with any other polarity are
/// left in place; their values are never guessed at. Unknown keys pass
/// through.
pub fn upgrade_legacy_params(mut params: ParamMap) -> BuiltParams {
    let mut notices = Vec::new();

    for param in DEPRECATED_PARAMS {
        if !params.contains_key(param.deprecated) {
            continue;
        }
        match param.polarity {
            Polarity::Same => {
                if let Some(value) = params.remove(param.deprecated)
                    && !params.contains_key(param.canonical)
                {
                    params.insert(param.canonical.to_string(), value);
                }
                notices.push(DeprecationNotice {
                    param,
                    renamed: true,
                });
            }
            Polarity::Inverted | Polarity::Unconfirmed => {
                notices.push(DeprecationNotice {
                    param,
                    renamed: false,
                });
            }
        }
    }

    BuiltParams { params, notices }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: serde_json::Value) -> ParamMap {
        match value {
            serde_json::Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_table_keys_are_unique() {
        for (i, a) in DEPRECATED_PARAMS.iter().enumerate() {
            for b in &DEPRECATED_PARAMS[i + 1..] {
                assert_ne!(a.deprecated, b.deprecated);
            }
        }
    }

    #[test]
    fn test_only_merge_is_a_builder_input() {
        let inputs: Vec<_> = DEPRECATED_PARAMS
            .iter()
            .filter(|p| p.accepted_as_input)
            .map(|p| p.deprecated)
            .collect();
        assert_eq!(inputs, vec!["merge"]);
    }

    #[test]
    fn test_merge_is_in_table() {
        assert_eq!(lookup("merge"), Some(&MERGE));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("enable_crc").unwrap().canonical, "disable_crypto");
        assert_eq!(lookup("enable_crc").unwrap().polarity, Polarity::Inverted);
        assert!(lookup("qp_size").is_none());
    }

    #[test]
    fn test_upgrade_renames_same_polarity_keys() {
        let built = upgrade_legacy_params(map(json!({
            "qp_size": 256,
            "split_mb_blocks": 8,
            "allowed_crypto_devs": "mlx5_0,mlx5_1",
        })));

        assert_eq!(
            serde_json::Value::Object(built.params),
            json!({
                "qp_size": 256,
                "crypto_split_blocks": 8,
                "allowed_devs": "mlx5_0,mlx5_1",
            })
        );
        assert_eq!(built.notices.len(), 2);
        assert!(built.notices.iter().all(|n| n.renamed));
    }

    #[test]
    fn test_upgrade_keeps_existing_canonical_value() {
        let built = upgrade_legacy_params(map(json!({
            "split_mb_blocks": 8,
            "crypto_split_blocks": 4,
        })));

        assert_eq!(
            serde_json::Value::Object(built.params),
            json!({ "crypto_split_blocks": 4 })
        );
        assert_eq!(built.notices.len(), 1);
    }

    #[test]
    fn test_upgrade_leaves_inverted_and_unconfirmed_keys() {
        let built = upgrade_legacy_params(map(json!({
            "enable_crc": true,
            "siglast": false,
        })));

        assert_eq!(
            serde_json::Value::Object(built.params),
            json!({ "enable_crc": true, "siglast": false })
        );
        assert_eq!(built.notices.len(), 2);
        assert!(built.notices.iter().all(|n| !n.renamed));
    }

    #[test]
    fn test_notice_display() {
        let notice = DeprecationNotice {
            param: lookup("merge").unwrap(),
            renamed: true,
        };
        assert_eq!(
            notice.to_string(),
            "\"merge\" is deprecated and will be removed in a future release, use \"enable_driver\" instead"
        );

        let notice = DeprecationNotice {
            param: lookup("enable_crc").unwrap(),
            renamed: false,
        };
        assert!(notice.to_string().contains("inverted meaning"));
    }
}
