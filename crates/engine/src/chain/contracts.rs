//! Compile-time ABI definitions for on-chain contracts via Alloy `sol!`.

use alloy::sol;

// ---------------------------------------------------------------------------
// TokenSwapper escrow
// ---------------------------------------------------------------------------

sol! {
    /// The escrow contract — authoritative ledger of swap terms and the
    /// oracle for readiness flags. Only the read surface and the two
    /// settlement entry points the UI targets are bound here.
    ///
    /// Token types travel as `uint8` on the wire (0 = none, 1 = ERC-20,
    /// 2 = ERC-777, 3 = ERC-721, 4 = ERC-1155); decoding into the domain
    /// enum is fallible at the boundary.
    #[sol(rpc)]
    interface ITokenSwapper {
        struct Swap {
            uint256 expiryDate;
            address initiator;
            address acceptor;
            address initiatorERCContract;
            address acceptorERCContract;
            uint256 initiatorTokenId;
            uint256 acceptorTokenId;
            uint256 initiatorTokenQuantity;
            uint256 acceptorTokenQuantity;
            uint256 initiatorETHPortion;
            uint256 acceptorETHPortion;
            uint8 initiatorTokenType;
            uint8 acceptorTokenType;
        }

        struct SwapStatus {
            bool initiatorNeedsToOwnToken;
            bool acceptorNeedsToOwnToken;
            bool initiatorTokenRequiresApproval;
            bool acceptorTokenRequiresApproval;
            bool isReadyForSwapping;
        }

        /// Live readiness flags. Must be called with the exact terms as
        /// persisted on-chain; mismatched terms produce undefined values.
        function getSwapStatus(uint256 swapId, Swap calldata swap)
            external view returns (SwapStatus memory status);

        function completeSwap(uint256 swapId, Swap calldata swap) external payable;
        function removeSwap(uint256 swapId, Swap calldata swap) external;

        event SwapInitiated(
            uint256 indexed swapId,
            address indexed initiator,
            address indexed acceptor,
            Swap swap
        );
        event SwapComplete(
            uint256 indexed swapId,
            address indexed initiator,
            address indexed acceptor,
            Swap swap
        );
        event SwapRemoved(uint256 indexed swapId, address indexed initiator);
    }
}

// ---------------------------------------------------------------------------
// ERC-20 metadata
// ---------------------------------------------------------------------------

sol! {
    /// Optional metadata surface queried best-effort for display labels.
    /// Not every token implements it — failures degrade to sentinels.
    #[sol(rpc)]
    interface IERC20Metadata {
        function name() external view returns (string memory);
        function decimals() external view returns (uint8);
    }
}
