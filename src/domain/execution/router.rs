//! Router02 swap entry points

use alloy::sol;

sol! {
    /// Uniswap V2 Router02, swap functions only.
    ///
    /// Every call takes a token path, a recipient and a unix deadline. The ETH variants
    /// wrap or unwrap the native asset through the router's WETH.
    #[sol(all_derives)]
    interface IUniswapV2Router02 {
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts);
        function swapTokensForExactTokens(uint256 amountOut, uint256 amountInMax, address[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts);
        function swapExactETHForTokens(uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) external payable returns (uint256[] memory amounts);
        function swapTokensForExactETH(uint256 amountOut, uint256 amountInMax, address[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts);
        function swapExactTokensForETH(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts);
        function swapETHForExactTokens(uint256 amountOut, address[] calldata path, address to, uint256 deadline) external payable returns (uint256[] memory amounts);
    }
}

#[cfg(test)]
mod tests {
    use super::IUniswapV2Router02::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_selectors_match_deployed_router() {
        assert_eq!(swapExactTokensForTokensCall::SELECTOR, [0x38, 0xed, 0x17, 0x39]);
        assert_eq!(swapTokensForExactTokensCall::SELECTOR, [0x88, 0x03, 0xdb, 0xee]);
        assert_eq!(swapExactETHForTokensCall::SELECTOR, [0x7f, 0xf3, 0x6a, 0xb5]);
        assert_eq!(swapTokensForExactETHCall::SELECTOR, [0x4a, 0x25, 0xd9, 0x4a]);
        assert_eq!(swapExactTokensForETHCall::SELECTOR, [0x18, 0xcb, 0xaf, 0xe5]);
        assert_eq!(swapETHForExactTokensCall::SELECTOR, [0xfb, 0x3b, 0xdb, 0x41]);
    }
}
