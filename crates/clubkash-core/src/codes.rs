//! Vendor code tables.
//!
//! The VTU API identifies networks, cable providers, distribution companies
//! and meter types by short string codes. These enums name the codes the
//! vendor documents; the client accepts any `AsRef<str>`, so codes missing
//! from these tables can still be sent as raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! vendor_code {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[doc = $doc:literal])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[doc = $doc])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every documented value, in code order.
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// The wire code sent to the vendor.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.code()
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.code().eq_ignore_ascii_case(code))
                    .ok_or_else(|| CoreError::UnknownCode {
                        kind: $kind,
                        code: s.to_string(),
                    })
            }
        }
    };
}

vendor_code! {
    /// Mobile network operator for airtime and data purchases.
    MobileNetwork, "mobile network" {
        /// MTN.
        Mtn => "01",
        /// Glo.
        Glo => "02",
        /// 9mobile.
        NineMobile => "03",
        /// Airtel.
        Airtel => "04",
    }
}

vendor_code! {
    /// Cable TV provider.
    CableTv, "cable TV" {
        /// `DStv`.
        Dstv => "dstv",
        /// `GOtv`.
        Gotv => "gotv",
        /// `StarTimes`.
        Startimes => "startimes",
    }
}

vendor_code! {
    /// Electricity distribution company.
    ElectricCompany, "electric company" {
        /// Eko Electric.
        Eko => "01",
        /// Ikeja Electric.
        Ikeja => "02",
        /// Abuja Electric.
        Abuja => "03",
        /// Kano Electric.
        Kano => "04",
        /// Port Harcourt Electric.
        PortHarcourt => "05",
        /// Jos Electric.
        Jos => "06",
        /// Ibadan Electric.
        Ibadan => "07",
        /// Kaduna Electric.
        Kaduna => "08",
        /// Enugu Electric.
        Enugu => "09",
        /// Benin Electric.
        Benin => "10",
    }
}

vendor_code! {
    /// Electricity meter billing type.
    MeterType, "meter type" {
        /// Prepaid meter; the purchase returns a token.
        Prepaid => "01",
        /// Postpaid meter; the purchase settles a bill.
        Postpaid => "02",
    }
}
