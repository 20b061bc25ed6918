//! Read-side bindings for the pair factory and pair contracts

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IUniswapV2Factory {
        /// Zero address when the pair does not exist
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
        function token0() external view returns (address);
        function token1() external view returns (address);
    }
}
