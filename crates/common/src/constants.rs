//! Universal constants for eth-whatif.

/// CoinGecko id of Ether.
pub const ETHEREUM_ID: &str = "ethereum";

/// How many coins the comparison list shows.
pub const TOP_COINS_LIMIT: usize = 10;

/// Page size for `/coins/markets`, large enough that every allow-listed
/// coin appears on the first page (sorted by market cap).
pub const MARKETS_PER_PAGE: u32 = 250;

/// Ranking value for coins without a reported 30-day change.
pub const MISSING_CHANGE_SENTINEL: f64 = -100.0;

/// Ether has 18 decimals.
pub const ETH_DECIMALS: u32 = 18;

/// CoinGecko ids of base-layer ("native") chain assets eligible for comparison.
pub const NATIVE_COIN_IDS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "solana",
    "avalanche-2",
    "binancecoin",
    "polkadot",
    "near",
    "fantom",
    "arbitrum",
    "optimism",
    "kaspa",
    "hedera",
    "stacks",
    "cardano",           // ADA
    "ripple",            // XRP
    "dogecoin",          // DOGE
    "litecoin",          // LTC
    "chainlink",         // LINK
    "tron",              // TRX
    "cosmos",            // ATOM
    "monero",            // XMR
    "stellar",           // XLM
    "uniswap",           // UNI
    "internet-computer", // ICP
    "okb",               // OKB
    "crypto-com-chain",  // CRO
    "vechain",           // VET
    "algorand",          // ALGO
    "the-graph",         // GRT
    "mantle",            // MNT
    "lido-dao",          // LDO
    "immutable-x",       // IMX
    "injective",         // INJ
    "toncoin",           // TON
    "aptos",             // APT
    "sui",               // SUI
    "sei-network",       // SEI
    "celestia",          // TIA
];

/// Is this CoinGecko id on the native-coin allow-list?
pub fn is_native_coin(id: &str) -> bool {
    NATIVE_COIN_IDS.contains(&id)
}

/// User-facing copy shared by the CLI and the web UI.
pub mod messages {
    pub const INVALID_ADDRESS: &str = "Invalid Ethereum address - Did you copy that right?";
    pub const INVALID_AMOUNT: &str =
        "Please enter a valid ETH amount , Atleast imagine you are rich for a second.";
    pub const NO_BALANCE: &str =
        "This wallet has no ETH balance! Try sending an address of NON-BROKE person.";
    pub const DEFAULT_ERROR: &str = "Failed to analyze wallet. Please try again in a few minutes.";
    pub const VALID_ADDRESS: &str = "Valid address! Time to see what could have been...";
    pub const LOADING: &str = "Calculating your alternate timeline wealth...";
    pub const BALANCE_OK: &str = "Balance retrieved successfully";
}
